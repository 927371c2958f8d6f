//! Tag dispatch: maps a start tag to its family reader and a [`Fixture`]
//! variant to its writer.
//!
//! Both directions are closed. An unknown tag is an error at the call
//! site that can decide whether to skip it; a missing writer arm is a
//! compile error.

use std::io::{BufRead, Write};

use spmap_model::fixtures::{ImmortalFamily, ImmortalKind};
use spmap_model::Fixture;

use crate::families::{explorable, mobile, resource, terrain, towns, unit};
use crate::sink::XmlSink;
use crate::stream::{Element, XmlSource};
use crate::{Error, ParseContext, Result};

/// All tags [`read_fixture`] accepts, in no particular order.
pub const FIXTURE_TAGS: &[&str] = &[
    "ground",
    "forest",
    "hill",
    "oasis",
    "animal",
    "centaur",
    "dragon",
    "fairy",
    "giant",
    "sphinx",
    "djinn",
    "griffin",
    "minotaur",
    "ogre",
    "phoenix",
    "simurgh",
    "troll",
    "text",
    "adventure",
    "portal",
    "cave",
    "battlefield",
    "cache",
    "resource",
    "implement",
    "grove",
    "orchard",
    "meadow",
    "field",
    "mine",
    "mineral",
    "shrub",
    "stone",
    "unit",
    "fortress",
    "town",
    "city",
    "fortification",
    "village",
];

/// Whether a start tag names a fixture element.
pub fn is_fixture_tag(tag: &str) -> bool {
    FIXTURE_TAGS.contains(&tag)
}

/// Reads the fixture whose start tag was just consumed, subtree and all.
pub fn read_fixture<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Fixture> {
    match element.tag() {
        "ground" => Ok(Fixture::Ground(terrain::read_ground(element, source, ctx)?)),
        "forest" => Ok(Fixture::Forest(terrain::read_forest(element, source, ctx)?)),
        "hill" => Ok(Fixture::Hill(terrain::read_hill(element, source, ctx)?)),
        "oasis" => Ok(Fixture::Oasis(terrain::read_oasis(element, source, ctx)?)),
        "animal" => Ok(Fixture::Animal(mobile::read_animal(element, source, ctx)?)),
        "centaur" => kinded(element, source, ctx, ImmortalFamily::Centaur),
        "dragon" => kinded(element, source, ctx, ImmortalFamily::Dragon),
        "fairy" => kinded(element, source, ctx, ImmortalFamily::Fairy),
        "giant" => kinded(element, source, ctx, ImmortalFamily::Giant),
        "sphinx" => simple(element, source, ctx, ImmortalKind::Sphinx),
        "djinn" => simple(element, source, ctx, ImmortalKind::Djinn),
        "griffin" => simple(element, source, ctx, ImmortalKind::Griffin),
        "minotaur" => simple(element, source, ctx, ImmortalKind::Minotaur),
        "ogre" => simple(element, source, ctx, ImmortalKind::Ogre),
        "phoenix" => simple(element, source, ctx, ImmortalKind::Phoenix),
        "simurgh" => simple(element, source, ctx, ImmortalKind::Simurgh),
        "troll" => simple(element, source, ctx, ImmortalKind::Troll),
        "text" => Ok(Fixture::Text(explorable::read_text(element, source, ctx)?)),
        "adventure" => Ok(Fixture::Adventure(explorable::read_adventure(
            element, source, ctx,
        )?)),
        "portal" => Ok(Fixture::Portal(explorable::read_portal(
            element, source, ctx,
        )?)),
        "cave" => Ok(Fixture::Cave(explorable::read_cave(element, source, ctx)?)),
        "battlefield" => Ok(Fixture::Battlefield(explorable::read_battlefield(
            element, source, ctx,
        )?)),
        "cache" => Ok(Fixture::Cache(resource::read_cache(element, source, ctx)?)),
        "resource" => Ok(Fixture::ResourcePile(resource::read_resource(
            element, source, ctx,
        )?)),
        "implement" => Ok(Fixture::Implement(resource::read_implement(
            element, source, ctx,
        )?)),
        "grove" | "orchard" => Ok(Fixture::Grove(resource::read_grove(element, source, ctx)?)),
        "meadow" | "field" => Ok(Fixture::Meadow(resource::read_meadow(element, source, ctx)?)),
        "mine" => Ok(Fixture::Mine(resource::read_mine(element, source, ctx)?)),
        "mineral" => Ok(Fixture::MineralVein(resource::read_mineral(
            element, source, ctx,
        )?)),
        "shrub" => Ok(Fixture::Shrub(resource::read_shrub(element, source, ctx)?)),
        "stone" => Ok(Fixture::StoneDeposit(resource::read_stone(
            element, source, ctx,
        )?)),
        "unit" => Ok(Fixture::Unit(unit::read_unit(element, source, ctx)?)),
        "fortress" => Ok(Fixture::Fortress(towns::read_fortress(
            element, source, ctx,
        )?)),
        "town" | "city" | "fortification" => {
            Ok(Fixture::Town(towns::read_town(element, source, ctx)?))
        }
        "village" => Ok(Fixture::Village(towns::read_village(element, source, ctx)?)),
        tag => Err(Error::UnsupportedTag {
            tag: tag.to_owned(),
            line: element.line,
        }),
    }
}

/// Writes one fixture, subtree and all.
pub fn write_fixture<W: Write>(sink: &mut XmlSink<W>, fixture: &Fixture) -> Result<()> {
    match fixture {
        Fixture::Ground(f) => terrain::write_ground(sink, f),
        Fixture::Forest(f) => terrain::write_forest(sink, f),
        Fixture::Hill(f) => terrain::write_hill(sink, f),
        Fixture::Oasis(f) => terrain::write_oasis(sink, f),
        Fixture::Animal(f) => mobile::write_animal(sink, f),
        Fixture::SimpleImmortal(f) => mobile::write_simple_immortal(sink, f),
        Fixture::KindedImmortal(f) => mobile::write_kinded_immortal(sink, f),
        Fixture::Text(f) => explorable::write_text(sink, f),
        Fixture::Adventure(f) => explorable::write_adventure(sink, f),
        Fixture::Portal(f) => explorable::write_portal(sink, f),
        Fixture::Cave(f) => explorable::write_cave(sink, f),
        Fixture::Battlefield(f) => explorable::write_battlefield(sink, f),
        Fixture::Cache(f) => resource::write_cache(sink, f),
        Fixture::ResourcePile(f) => resource::write_resource(sink, f),
        Fixture::Implement(f) => resource::write_implement(sink, f),
        Fixture::Grove(f) => resource::write_grove(sink, f),
        Fixture::Meadow(f) => resource::write_meadow(sink, f),
        Fixture::Mine(f) => resource::write_mine(sink, f),
        Fixture::MineralVein(f) => resource::write_mineral(sink, f),
        Fixture::Shrub(f) => resource::write_shrub(sink, f),
        Fixture::StoneDeposit(f) => resource::write_stone(sink, f),
        Fixture::Unit(f) => unit::write_unit(sink, f),
        Fixture::Fortress(f) => towns::write_fortress(sink, f),
        Fixture::Town(f) => towns::write_town(sink, f),
        Fixture::Village(f) => towns::write_village(sink, f),
    }
}

fn kinded<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
    family: ImmortalFamily,
) -> Result<Fixture> {
    Ok(Fixture::KindedImmortal(mobile::read_kinded_immortal(
        element, source, ctx, family,
    )?))
}

fn simple<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
    kind: ImmortalKind,
) -> Result<Fixture> {
    Ok(Fixture::SimpleImmortal(mobile::read_simple_immortal(
        element, source, ctx, kind,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{parse_fixture, roundtrip};

    #[test]
    fn every_fixture_tag_is_dispatched() {
        // Each accepted tag must reach a reader, not the fallthrough arm.
        for tag in FIXTURE_TAGS {
            let result = parse_fixture(&format!("<{tag} id=\"1\"/>"));
            assert!(
                !matches!(result, Err(Error::UnsupportedTag { .. })),
                "tag {tag} fell through dispatch"
            );
        }
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        let result = parse_fixture("<volcano id=\"1\"/>");
        assert!(matches!(result, Err(Error::UnsupportedTag { .. })));
    }

    #[test]
    fn written_tag_reads_back_to_the_same_variant() {
        let samples = [
            "<hill id=\"1\"/>",
            "<troll id=\"2\"/>",
            "<giant kind=\"hill\" id=\"3\"/>",
            "<cache kind=\"food\" contents=\"grain\" id=\"4\"/>",
            "<orchard kind=\"apple\" cultivated=\"true\" id=\"5\"/>",
        ];
        for xml in samples {
            let (fixture, _) = parse_fixture(xml).unwrap();
            assert_eq!(roundtrip(&fixture), fixture);
        }
    }
}
