//! Mobile-creature elements: `animal` and the immortal tags.

use std::io::{BufRead, Write};

use spmap_model::fixtures::{
    Animal, ImmortalFamily, ImmortalKind, KindedImmortal, SimpleImmortal,
};

use crate::sink::{Attrs, XmlSink};
use crate::stream::{expect_tag, Element, XmlSource};
use crate::{ParseContext, Result};

pub fn read_animal<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Animal> {
    expect_tag(element, &["animal"])?;
    element.expect_attributes(
        &mut ctx.warner,
        &["kind", "talking", "status", "born", "count", "id", "image"],
    )?;
    let animal = Animal {
        id: element.object_id(ctx)?,
        kind: element.require_str("kind")?.to_owned(),
        talking: element.optional_bool("talking", false)?,
        status: element.optional_str_or("status", Animal::DEFAULT_STATUS),
        born: element.optional_int("born", -1)?,
        count: element.optional_int("count", 1)?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(animal)
}

pub fn write_animal<W: Write>(sink: &mut XmlSink<W>, fixture: &Animal) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("kind", &fixture.kind);
    if fixture.talking {
        attrs.push("talking", true);
    }
    if fixture.status != Animal::DEFAULT_STATUS {
        attrs.push("status", &fixture.status);
    }
    if fixture.born >= 0 {
        attrs.push("born", fixture.born);
    }
    if fixture.count > 1 {
        attrs.push("count", fixture.count);
    }
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("animal", &attrs)
}

pub fn read_kinded_immortal<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
    family: ImmortalFamily,
) -> Result<KindedImmortal> {
    expect_tag(element, &[family.tag()])?;
    element.expect_attributes(&mut ctx.warner, &["kind", "id", "image"])?;
    let immortal = KindedImmortal {
        family,
        kind: element.require_str("kind")?.to_owned(),
        id: element.object_id(ctx)?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(immortal)
}

pub fn write_kinded_immortal<W: Write>(
    sink: &mut XmlSink<W>,
    fixture: &KindedImmortal,
) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("kind", &fixture.kind);
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty(fixture.family.tag(), &attrs)
}

pub fn read_simple_immortal<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
    kind: ImmortalKind,
) -> Result<SimpleImmortal> {
    expect_tag(element, &[kind.tag()])?;
    element.expect_attributes(&mut ctx.warner, &["id", "image"])?;
    let immortal = SimpleImmortal {
        kind,
        id: element.object_id(ctx)?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(immortal)
}

pub fn write_simple_immortal<W: Write>(
    sink: &mut XmlSink<W>,
    fixture: &SimpleImmortal,
) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty(fixture.kind.tag(), &attrs)
}

#[cfg(test)]
mod tests {
    use spmap_model::fixtures::{Animal, ImmortalKind, SimpleImmortal};
    use spmap_model::Fixture;

    use crate::test_util::{parse_fixture, roundtrip, write_fixture_string};
    use crate::Warning;

    #[test]
    fn animal_defaults_round_trip() {
        let fixture = Fixture::Animal(Animal {
            id: 7,
            kind: "horse".into(),
            talking: false,
            status: Animal::DEFAULT_STATUS.into(),
            born: -1,
            count: 1,
            image: None,
        });
        let xml = write_fixture_string(&fixture);
        // Default-valued attributes must be omitted.
        assert_eq!(xml, "<animal kind=\"horse\" id=\"7\"/>");
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn animal_full_round_trip() {
        let fixture = Fixture::Animal(Animal {
            id: 8,
            kind: "wolf".into(),
            talking: true,
            status: "tame".into(),
            born: 12,
            count: 2,
            image: Some("wolf.png".into()),
        });
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn simple_immortal_round_trips() {
        for kind in [ImmortalKind::Sphinx, ImmortalKind::Troll] {
            let fixture = Fixture::SimpleImmortal(SimpleImmortal {
                kind,
                id: 9,
                image: None,
            });
            assert_eq!(roundtrip(&fixture), fixture);
        }
    }

    #[test]
    fn dragon_kind_is_required() {
        let (fixture, warnings) = parse_fixture("<dragon kind=\"green\" id=\"3\"/>").unwrap();
        let Fixture::KindedImmortal(dragon) = &fixture else {
            panic!("wrong variant");
        };
        assert_eq!(dragon.kind, "green");
        assert!(warnings.is_empty());
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn unknown_attribute_on_animal_warns_once() {
        let (_, warnings) =
            parse_fixture("<animal kind=\"bear\" id=\"1\" ferocity=\"high\"/>").unwrap();
        assert!(matches!(
            warnings.as_slice(),
            [Warning::UnsupportedProperty { ref attribute, .. }] if attribute == "ferocity"
        ));
    }
}
