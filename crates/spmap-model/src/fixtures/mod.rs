//! The closed set of things that can occupy a map location.
//!
//! `Fixture` is a tagged union so the XML dispatch layer can match
//! exhaustively; adding a variant without a reader and writer is a compile
//! error there.

pub mod explorable;
pub mod mobile;
pub mod resource;
pub mod terrain;
pub mod towns;
pub mod unit;

pub use explorable::{Adventure, Battlefield, Cave, Portal, TextNote};
pub use mobile::{Animal, ImmortalFamily, ImmortalKind, KindedImmortal, SimpleImmortal};
pub use resource::{
    Cache, FieldStatus, Grove, Implement, Meadow, Mine, MineralVein, ResourcePile, Shrub,
    StoneDeposit,
};
pub use terrain::{Forest, Ground, Hill, Oasis};
pub use towns::{
    CommunityStats, Fortress, Town, TownKind, TownSize, TownStatus, Village,
};
pub use unit::{Job, Skill, Unit, Worker, WorkerStats};

/// Anything that can sit on a tile or in the elsewhere bucket.
#[derive(Debug, Clone, PartialEq)]
pub enum Fixture {
    Ground(Ground),
    Forest(Forest),
    Hill(Hill),
    Oasis(Oasis),
    Animal(Animal),
    SimpleImmortal(SimpleImmortal),
    KindedImmortal(KindedImmortal),
    Text(TextNote),
    Adventure(Adventure),
    Portal(Portal),
    Cave(Cave),
    Battlefield(Battlefield),
    Cache(Cache),
    ResourcePile(ResourcePile),
    Implement(Implement),
    Grove(Grove),
    Meadow(Meadow),
    Mine(Mine),
    MineralVein(MineralVein),
    Shrub(Shrub),
    StoneDeposit(StoneDeposit),
    Unit(Unit),
    Fortress(Fortress),
    Town(Town),
    Village(Village),
}

impl Fixture {
    /// The document-wide unique ID of this fixture.
    pub fn id(&self) -> i32 {
        match self {
            Fixture::Ground(f) => f.id,
            Fixture::Forest(f) => f.id,
            Fixture::Hill(f) => f.id,
            Fixture::Oasis(f) => f.id,
            Fixture::Animal(f) => f.id,
            Fixture::SimpleImmortal(f) => f.id,
            Fixture::KindedImmortal(f) => f.id,
            Fixture::Text(f) => f.id,
            Fixture::Adventure(f) => f.id,
            Fixture::Portal(f) => f.id,
            Fixture::Cave(f) => f.id,
            Fixture::Battlefield(f) => f.id,
            Fixture::Cache(f) => f.id,
            Fixture::ResourcePile(f) => f.id,
            Fixture::Implement(f) => f.id,
            Fixture::Grove(f) => f.id,
            Fixture::Meadow(f) => f.id,
            Fixture::Mine(f) => f.id,
            Fixture::MineralVein(f) => f.id,
            Fixture::Shrub(f) => f.id,
            Fixture::StoneDeposit(f) => f.id,
            Fixture::Unit(f) => f.id,
            Fixture::Fortress(f) => f.id,
            Fixture::Town(f) => f.id,
            Fixture::Village(f) => f.id,
        }
    }

    /// The custom icon override, if any.
    pub fn image(&self) -> Option<&str> {
        let image = match self {
            Fixture::Ground(f) => &f.image,
            Fixture::Forest(f) => &f.image,
            Fixture::Hill(f) => &f.image,
            Fixture::Oasis(f) => &f.image,
            Fixture::Animal(f) => &f.image,
            Fixture::SimpleImmortal(f) => &f.image,
            Fixture::KindedImmortal(f) => &f.image,
            Fixture::Text(f) => &f.image,
            Fixture::Adventure(f) => &f.image,
            Fixture::Portal(f) => &f.image,
            Fixture::Cave(f) => &f.image,
            Fixture::Battlefield(f) => &f.image,
            Fixture::Cache(f) => &f.image,
            Fixture::ResourcePile(f) => &f.image,
            Fixture::Implement(f) => &f.image,
            Fixture::Grove(f) => &f.image,
            Fixture::Meadow(f) => &f.image,
            Fixture::Mine(f) => &f.image,
            Fixture::MineralVein(f) => &f.image,
            Fixture::Shrub(f) => &f.image,
            Fixture::StoneDeposit(f) => &f.image,
            Fixture::Unit(f) => &f.image,
            Fixture::Fortress(f) => &f.image,
            Fixture::Town(f) => &f.image,
            Fixture::Village(f) => &f.image,
        };
        image.as_deref()
    }

    /// Used by the tile writer's fixed ordering convention.
    pub fn is_ground(&self) -> bool {
        matches!(self, Fixture::Ground(_))
    }

    /// Used by the tile writer's fixed ordering convention.
    pub fn is_forest(&self) -> bool {
        matches!(self, Fixture::Forest(_))
    }
}

/// Things a unit can contain.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitMember {
    Worker(Worker),
    Animal(Animal),
    ResourcePile(ResourcePile),
    Implement(Implement),
}

impl UnitMember {
    pub fn id(&self) -> i32 {
        match self {
            UnitMember::Worker(m) => m.id,
            UnitMember::Animal(m) => m.id,
            UnitMember::ResourcePile(m) => m.id,
            UnitMember::Implement(m) => m.id,
        }
    }
}

/// Things a fortress can contain.
#[derive(Debug, Clone, PartialEq)]
pub enum FortressMember {
    Unit(Unit),
    ResourcePile(ResourcePile),
    Implement(Implement),
}

impl FortressMember {
    pub fn id(&self) -> i32 {
        match self {
            FortressMember::Unit(m) => m.id,
            FortressMember::ResourcePile(m) => m.id,
            FortressMember::Implement(m) => m.id,
        }
    }
}
