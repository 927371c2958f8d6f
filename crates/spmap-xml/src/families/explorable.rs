//! Explorables and annotations: `text`, `adventure`, `portal`, `cave`,
//! `battlefield`.

use std::io::{BufRead, Write};

use spmap_model::fixtures::{Adventure, Battlefield, Cave, Portal, TextNote};
use spmap_model::Point;

use crate::sink::{Attrs, XmlSink};
use crate::stream::{expect_tag, Element, XmlSource};
use crate::{ParseContext, Result};

pub fn read_text<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<TextNote> {
    expect_tag(element, &["text"])?;
    element.expect_attributes(&mut ctx.warner, &["turn", "id", "image"])?;
    let turn = element.optional_int("turn", -1)?;
    let id = element.object_id(ctx)?;
    let image = element.image();
    let text = source.text_content(element, ctx)?;
    Ok(TextNote {
        id,
        text,
        turn,
        image,
    })
}

pub fn write_text<W: Write>(sink: &mut XmlSink<W>, fixture: &TextNote) -> Result<()> {
    let mut attrs = Attrs::new();
    if fixture.turn >= 0 {
        attrs.push("turn", fixture.turn);
    }
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.start("text", &attrs)?;
    sink.text(&fixture.text)?;
    sink.end("text")
}

pub fn read_adventure<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Adventure> {
    expect_tag(element, &["adventure"])?;
    element.expect_attributes(
        &mut ctx.warner,
        &["brief", "full", "owner", "id", "image"],
    )?;
    let adventure = Adventure {
        id: element.object_id(ctx)?,
        brief: element.optional_str_or("brief", ""),
        full: element.optional_str_or("full", ""),
        owner: element.optional_int("owner", -1)?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(adventure)
}

pub fn write_adventure<W: Write>(sink: &mut XmlSink<W>, fixture: &Adventure) -> Result<()> {
    let mut attrs = Attrs::new();
    if !fixture.brief.is_empty() {
        attrs.push("brief", &fixture.brief);
    }
    if !fixture.full.is_empty() {
        attrs.push("full", &fixture.full);
    }
    if fixture.owner >= 0 {
        attrs.push("owner", fixture.owner);
    }
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("adventure", &attrs)
}

pub fn read_portal<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Portal> {
    expect_tag(element, &["portal"])?;
    element.expect_attributes(&mut ctx.warner, &["world", "row", "column", "id", "image"])?;
    let portal = Portal {
        id: element.object_id(ctx)?,
        destination_world: element.require_str("world")?.to_owned(),
        destination: Point::new(element.require_int("row")?, element.require_int("column")?),
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(portal)
}

pub fn write_portal<W: Write>(sink: &mut XmlSink<W>, fixture: &Portal) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("world", &fixture.destination_world);
    attrs.push("row", fixture.destination.row);
    attrs.push("column", fixture.destination.column);
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("portal", &attrs)
}

pub fn read_cave<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Cave> {
    expect_tag(element, &["cave"])?;
    element.expect_attributes(&mut ctx.warner, &["dc", "id", "image"])?;
    let cave = Cave {
        id: element.object_id(ctx)?,
        dc: element.require_int("dc")?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(cave)
}

pub fn write_cave<W: Write>(sink: &mut XmlSink<W>, fixture: &Cave) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("dc", fixture.dc);
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("cave", &attrs)
}

pub fn read_battlefield<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Battlefield> {
    expect_tag(element, &["battlefield"])?;
    element.expect_attributes(&mut ctx.warner, &["dc", "id", "image"])?;
    let battlefield = Battlefield {
        id: element.object_id(ctx)?,
        dc: element.require_int("dc")?,
        image: element.image(),
    };
    source.spin_to_end(element, ctx)?;
    Ok(battlefield)
}

pub fn write_battlefield<W: Write>(sink: &mut XmlSink<W>, fixture: &Battlefield) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("dc", fixture.dc);
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    sink.empty("battlefield", &attrs)
}

#[cfg(test)]
mod tests {
    use spmap_model::fixtures::{Adventure, Portal, TextNote};
    use spmap_model::{Fixture, Point};

    use crate::test_util::{parse_fixture, roundtrip, write_fixture_string};

    #[test]
    fn text_round_trips_with_turn() {
        let fixture = Fixture::Text(TextNote {
            id: 3,
            text: "ruins visible to the east".into(),
            turn: 12,
            image: None,
        });
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn text_keeps_custom_image() {
        let (fixture, warnings) =
            parse_fixture("<text turn=\"2\" id=\"3\" image=\"scroll.png\">hello</text>").unwrap();
        assert!(warnings.is_empty());
        let Fixture::Text(note) = &fixture else {
            panic!("wrong variant");
        };
        assert_eq!(note.image.as_deref(), Some("scroll.png"));
        assert_eq!(
            write_fixture_string(&fixture),
            "<text turn=\"2\" id=\"3\" image=\"scroll.png\">hello</text>"
        );
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn text_turn_sentinel_is_omitted() {
        let fixture = Fixture::Text(TextNote {
            id: 3,
            text: "old note".into(),
            turn: -1,
            image: None,
        });
        let xml = write_fixture_string(&fixture);
        assert_eq!(xml, "<text id=\"3\">old note</text>");
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn adventure_round_trips() {
        let fixture = Fixture::Adventure(Adventure {
            id: 11,
            brief: "A cave of wonders".into(),
            full: "A deep cave with something glittering".into(),
            owner: 2,
            image: None,
        });
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn portal_destination_round_trips() {
        let fixture = Fixture::Portal(Portal {
            id: 4,
            destination_world: "mirror".into(),
            destination: Point::new(10, 20),
            image: None,
        });
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn portal_accepts_offgrid_destination() {
        let (fixture, _) =
            parse_fixture("<portal world=\"unknown\" row=\"-1\" column=\"-1\" id=\"6\"/>")
                .unwrap();
        let Fixture::Portal(portal) = &fixture else {
            panic!("wrong variant");
        };
        assert_eq!(portal.destination, Point::INVALID);
    }
}
