//! Terrain-feature elements: `ground`, `forest`, `hill`, `oasis`.

use std::io::{BufRead, Write};

use spmap_model::fixtures::{Forest, Ground, Hill, Oasis};
use spmap_model::Number;

use crate::sink::{Attrs, XmlSink};
use crate::stream::{expect_tag, Element, XmlSource};
use crate::{ParseContext, Result};

pub fn read_ground<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Ground> {
    expect_tag(element, &["ground"])?;
    element.expect_attributes(&mut ctx.warner, &["kind", "ground", "exposed", "id", "image"])?;
    let kind = element.with_deprecated_alias("kind", "ground", &mut ctx.warner)?;
    let ground = Ground {
        id: element.object_id(ctx)?,
        kind,
        exposed: element.require_bool("exposed")?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(ground)
}

pub fn write_ground<W: Write>(sink: &mut XmlSink<W>, fixture: &Ground) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("kind", &fixture.kind);
    attrs.push("exposed", fixture.exposed);
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("ground", &attrs)
}

pub fn read_forest<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Forest> {
    expect_tag(element, &["forest"])?;
    element.expect_attributes(&mut ctx.warner, &["kind", "rows", "acres", "id", "image"])?;
    let forest = Forest {
        id: element.object_id(ctx)?,
        kind: element.require_str("kind")?.to_owned(),
        rows: element.optional_bool("rows", false)?,
        acres: element.optional_number("acres", Number::Whole(-1))?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(forest)
}

pub fn write_forest<W: Write>(sink: &mut XmlSink<W>, fixture: &Forest) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("kind", &fixture.kind);
    if fixture.rows {
        attrs.push("rows", true);
    }
    if !fixture.acres.is_integer(-1) {
        attrs.push("acres", fixture.acres);
    }
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("forest", &attrs)
}

pub fn read_hill<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Hill> {
    expect_tag(element, &["hill"])?;
    element.expect_attributes(&mut ctx.warner, &["id", "image"])?;
    let hill = Hill {
        id: element.object_id(ctx)?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(hill)
}

pub fn write_hill<W: Write>(sink: &mut XmlSink<W>, fixture: &Hill) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("hill", &attrs)
}

pub fn read_oasis<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Oasis> {
    expect_tag(element, &["oasis"])?;
    element.expect_attributes(&mut ctx.warner, &["id", "image"])?;
    let oasis = Oasis {
        id: element.object_id(ctx)?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(oasis)
}

pub fn write_oasis<W: Write>(sink: &mut XmlSink<W>, fixture: &Oasis) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("oasis", &attrs)
}

#[cfg(test)]
mod tests {
    use spmap_model::Fixture;

    use crate::test_util::{parse_fixture, roundtrip};
    use crate::{Error, Warning};

    #[test]
    fn ground_round_trips() {
        let fixture = Fixture::Ground(spmap_model::fixtures::Ground {
            id: 4,
            kind: "sandstone".into(),
            exposed: true,
            image: None,
        });
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn ground_accepts_deprecated_kind_alias() {
        let (fixture, warnings) =
            parse_fixture("<ground ground=\"limestone\" exposed=\"false\" id=\"1\"/>").unwrap();
        let Fixture::Ground(ground) = fixture else {
            panic!("wrong variant");
        };
        assert_eq!(ground.kind, "limestone");
        assert!(matches!(
            warnings.as_slice(),
            [Warning::DeprecatedProperty {
                deprecated: "ground",
                ..
            }]
        ));
    }

    #[test]
    fn forest_defaults_round_trip() {
        let fixture = Fixture::Forest(spmap_model::fixtures::Forest {
            id: 2,
            kind: "oak".into(),
            rows: false,
            acres: spmap_model::Number::Whole(-1),
            image: Some("oak.png".into()),
        });
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn forest_decimal_acres_round_trip() {
        let (fixture, _) =
            parse_fixture("<forest kind=\"pine\" acres=\"12.5\" id=\"3\"/>").unwrap();
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn ground_missing_exposed_fails() {
        let result = parse_fixture("<ground kind=\"granite\" id=\"1\"/>");
        assert!(matches!(
            result,
            Err(Error::MissingProperty {
                attribute: "exposed",
                ..
            })
        ));
    }
}
