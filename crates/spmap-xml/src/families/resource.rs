//! Harvestable-resource elements: `cache`, `resource`, `implement`,
//! `grove`/`orchard`, `meadow`/`field`, `mine`, `mineral`, `shrub`,
//! `stone`.

use std::io::{BufRead, Write};

use spmap_model::fixtures::{
    Cache, FieldStatus, Grove, Implement, Meadow, Mine, MineralVein, ResourcePile, Shrub,
    StoneDeposit, TownStatus,
};
use spmap_model::Number;

use crate::sink::{Attrs, XmlSink};
use crate::stream::{expect_tag, Element, XmlSource};
use crate::{ParseContext, Result};

pub fn read_cache<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Cache> {
    expect_tag(element, &["cache"])?;
    element.expect_attributes(&mut ctx.warner, &["kind", "contents", "id", "image"])?;
    let cache = Cache {
        id: element.object_id(ctx)?,
        kind: element.require_str("kind")?.to_owned(),
        contents: element.require_str("contents")?.to_owned(),
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(cache)
}

pub fn write_cache<W: Write>(sink: &mut XmlSink<W>, fixture: &Cache) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("kind", &fixture.kind);
    attrs.push("contents", &fixture.contents);
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("cache", &attrs)
}

pub fn read_resource<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<ResourcePile> {
    expect_tag(element, &["resource"])?;
    element.expect_attributes(
        &mut ctx.warner,
        &["kind", "contents", "quantity", "units", "created", "id", "image"],
    )?;
    let pile = ResourcePile {
        id: element.object_id(ctx)?,
        kind: element.require_str("kind")?.to_owned(),
        contents: element.require_str("contents")?.to_owned(),
        quantity: element.require_number("quantity")?,
        units: element.optional_str_or("units", ""),
        created: element.optional_int("created", -1)?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(pile)
}

pub fn write_resource<W: Write>(sink: &mut XmlSink<W>, fixture: &ResourcePile) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("kind", &fixture.kind);
    attrs.push("contents", &fixture.contents);
    attrs.push("quantity", fixture.quantity);
    if !fixture.units.is_empty() {
        attrs.push("units", &fixture.units);
    }
    if fixture.created >= 0 {
        attrs.push("created", fixture.created);
    }
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("resource", &attrs)
}

pub fn read_implement<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Implement> {
    expect_tag(element, &["implement"])?;
    element.expect_attributes(&mut ctx.warner, &["kind", "count", "id", "image"])?;
    let implement = Implement {
        id: element.object_id(ctx)?,
        kind: element.require_str("kind")?.to_owned(),
        count: element.optional_int("count", 1)?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(implement)
}

pub fn write_implement<W: Write>(sink: &mut XmlSink<W>, fixture: &Implement) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("kind", &fixture.kind);
    if fixture.count > 1 {
        attrs.push("count", fixture.count);
    }
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("implement", &attrs)
}

pub fn read_grove<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Grove> {
    expect_tag(element, &["grove", "orchard"])?;
    element.expect_attributes(
        &mut ctx.warner,
        &["kind", "tree", "cultivated", "count", "id", "image"],
    )?;
    let kind = element.with_deprecated_alias("kind", "tree", &mut ctx.warner)?;
    let grove = Grove {
        id: element.object_id(ctx)?,
        orchard: element.tag() == "orchard",
        kind,
        cultivated: element.require_bool("cultivated")?,
        count: element.optional_int("count", -1)?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(grove)
}

pub fn write_grove<W: Write>(sink: &mut XmlSink<W>, fixture: &Grove) -> Result<()> {
    let tag = if fixture.orchard { "orchard" } else { "grove" };
    let mut attrs = Attrs::new();
    attrs.push("kind", &fixture.kind);
    attrs.push("cultivated", fixture.cultivated);
    if fixture.count >= 0 {
        attrs.push("count", fixture.count);
    }
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty(tag, &attrs)
}

pub fn read_meadow<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Meadow> {
    expect_tag(element, &["meadow", "field"])?;
    element.expect_attributes(
        &mut ctx.warner,
        &["kind", "cultivated", "status", "acres", "id", "image"],
    )?;
    let meadow = Meadow {
        id: element.object_id(ctx)?,
        field: element.tag() == "field",
        kind: element.require_str("kind")?.to_owned(),
        cultivated: element.require_bool("cultivated")?,
        status: element.require_enum::<FieldStatus>("status")?,
        acres: element.optional_number("acres", Number::Whole(-1))?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(meadow)
}

pub fn write_meadow<W: Write>(sink: &mut XmlSink<W>, fixture: &Meadow) -> Result<()> {
    let tag = if fixture.field { "field" } else { "meadow" };
    let mut attrs = Attrs::new();
    attrs.push("kind", &fixture.kind);
    attrs.push("cultivated", fixture.cultivated);
    attrs.push("status", fixture.status);
    if !fixture.acres.is_integer(-1) {
        attrs.push("acres", fixture.acres);
    }
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty(tag, &attrs)
}

pub fn read_mine<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Mine> {
    expect_tag(element, &["mine"])?;
    element.expect_attributes(
        &mut ctx.warner,
        &["kind", "product", "status", "id", "image"],
    )?;
    let kind = element.with_deprecated_alias("kind", "product", &mut ctx.warner)?;
    let mine = Mine {
        id: element.object_id(ctx)?,
        kind,
        status: element.require_enum::<TownStatus>("status")?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(mine)
}

pub fn write_mine<W: Write>(sink: &mut XmlSink<W>, fixture: &Mine) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("kind", &fixture.kind);
    attrs.push("status", fixture.status);
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("mine", &attrs)
}

pub fn read_mineral<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<MineralVein> {
    expect_tag(element, &["mineral"])?;
    element.expect_attributes(
        &mut ctx.warner,
        &["kind", "mineral", "exposed", "dc", "id", "image"],
    )?;
    let kind = element.with_deprecated_alias("kind", "mineral", &mut ctx.warner)?;
    let vein = MineralVein {
        id: element.object_id(ctx)?,
        kind,
        exposed: element.require_bool("exposed")?,
        dc: element.require_int("dc")?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(vein)
}

pub fn write_mineral<W: Write>(sink: &mut XmlSink<W>, fixture: &MineralVein) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("kind", &fixture.kind);
    attrs.push("exposed", fixture.exposed);
    attrs.push("dc", fixture.dc);
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("mineral", &attrs)
}

pub fn read_shrub<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Shrub> {
    expect_tag(element, &["shrub"])?;
    element.expect_attributes(&mut ctx.warner, &["kind", "shrub", "count", "id", "image"])?;
    let kind = element.with_deprecated_alias("kind", "shrub", &mut ctx.warner)?;
    let shrub = Shrub {
        id: element.object_id(ctx)?,
        kind,
        count: element.optional_int("count", -1)?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(shrub)
}

pub fn write_shrub<W: Write>(sink: &mut XmlSink<W>, fixture: &Shrub) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("kind", &fixture.kind);
    if fixture.count >= 0 {
        attrs.push("count", fixture.count);
    }
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("shrub", &attrs)
}

pub fn read_stone<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<StoneDeposit> {
    expect_tag(element, &["stone"])?;
    element.expect_attributes(&mut ctx.warner, &["kind", "stone", "dc", "id", "image"])?;
    let kind = element.with_deprecated_alias("kind", "stone", &mut ctx.warner)?;
    let deposit = StoneDeposit {
        id: element.object_id(ctx)?,
        kind,
        dc: element.require_int("dc")?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(deposit)
}

pub fn write_stone<W: Write>(sink: &mut XmlSink<W>, fixture: &StoneDeposit) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("kind", &fixture.kind);
    attrs.push("dc", fixture.dc);
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("stone", &attrs)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use spmap_model::fixtures::{
        FieldStatus, Grove, Implement, Meadow, ResourcePile, TownStatus,
    };
    use spmap_model::{Fixture, Number};

    use crate::test_util::{parse_fixture, roundtrip, write_fixture_string};
    use crate::{Error, Warning};

    #[test]
    fn mineral_deprecated_alias_is_equivalent() {
        let (modern, modern_warnings) =
            parse_fixture("<mineral kind=\"copper\" exposed=\"true\" dc=\"15\" id=\"1\"/>")
                .unwrap();
        let (legacy, legacy_warnings) =
            parse_fixture("<mineral mineral=\"copper\" exposed=\"true\" dc=\"15\" id=\"1\"/>")
                .unwrap();
        let (Fixture::MineralVein(a), Fixture::MineralVein(b)) = (&modern, &legacy) else {
            panic!("wrong variants");
        };
        assert_eq!(a.kind, b.kind);
        assert!(modern_warnings.is_empty());
        assert!(matches!(
            legacy_warnings.as_slice(),
            [Warning::DeprecatedProperty { .. }]
        ));
    }

    #[test]
    fn resource_pile_round_trips_decimal_quantity() {
        let fixture = Fixture::ResourcePile(ResourcePile {
            id: 10,
            kind: "food".into(),
            contents: "wheat".into(),
            quantity: Number::Decimal(Decimal::new(45, 1)),
            units: "bushels".into(),
            created: 3,
            image: None,
        });
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn implement_count_boundary_round_trips() {
        for count in [1, 2] {
            let fixture = Fixture::Implement(Implement {
                id: 5,
                kind: "plow".into(),
                count,
                image: None,
            });
            assert_eq!(roundtrip(&fixture), fixture);
        }
        let single = Fixture::Implement(Implement {
            id: 5,
            kind: "plow".into(),
            count: 1,
            image: None,
        });
        assert_eq!(
            write_fixture_string(&single),
            "<implement kind=\"plow\" id=\"5\"/>"
        );
    }

    #[test]
    fn orchard_and_grove_tags_select_variant() {
        let (orchard, _) =
            parse_fixture("<orchard kind=\"apple\" cultivated=\"true\" id=\"2\"/>").unwrap();
        let Fixture::Grove(g) = &orchard else {
            panic!("wrong variant");
        };
        assert!(g.orchard);
        assert_eq!(roundtrip(&orchard), orchard);

        let grove = Fixture::Grove(Grove {
            id: 3,
            orchard: false,
            kind: "birch".into(),
            cultivated: false,
            count: 40,
            image: None,
        });
        assert!(write_fixture_string(&grove).starts_with("<grove "));
    }

    #[test]
    fn field_status_is_validated() {
        let result =
            parse_fixture("<field kind=\"wheat\" cultivated=\"true\" status=\"moldy\" id=\"4\"/>");
        assert!(matches!(result, Err(Error::MalformedValue { .. })));
    }

    #[test]
    fn meadow_round_trips() {
        let fixture = Fixture::Meadow(Meadow {
            id: 6,
            field: true,
            kind: "barley".into(),
            cultivated: true,
            status: FieldStatus::Growing,
            acres: Number::Whole(-1),
            image: None,
        });
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn mine_round_trips() {
        let fixture = Fixture::Mine(spmap_model::fixtures::Mine {
            id: 5,
            kind: "gold".into(),
            status: TownStatus::Active,
            image: None,
        });
        let xml = write_fixture_string(&fixture);
        assert_eq!(xml, "<mine kind=\"gold\" status=\"active\" id=\"5\"/>");
        assert_eq!(roundtrip(&fixture), fixture);
    }
}
