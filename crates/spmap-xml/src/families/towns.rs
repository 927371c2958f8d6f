//! Settlement elements: `town`/`city`/`fortification`, `village`, and
//! `fortress` with its member roster.

use std::io::{BufRead, Write};

use spmap_model::fixtures::{Fortress, Town, TownKind, TownSize, Village};
use spmap_model::FortressMember;

use crate::families::{community, resource, unit};
use crate::sink::{Attrs, XmlSink};
use crate::stream::{expect_tag, Element, Node, XmlSource};
use crate::{Error, ParseContext, Result};

fn kind_from_tag(tag: &str) -> TownKind {
    match tag {
        "city" => TownKind::City,
        "fortification" => TownKind::Fortification,
        _ => TownKind::Town,
    }
}

/// Reads a `town`, `city`, or `fortification`; the tag chooses the kind.
pub fn read_town<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Town> {
    expect_tag(element, &["town", "city", "fortification"])?;
    element.expect_attributes(
        &mut ctx.warner,
        &["status", "size", "name", "dc", "owner", "id", "image", "portrait"],
    )?;
    let mut town = Town {
        id: element.object_id(ctx)?,
        kind: kind_from_tag(element.tag()),
        status: element.require_enum("status")?,
        size: element.require_enum("size")?,
        name: element.optional_str_or("name", ""),
        dc: element.require_int("dc")?,
        owner: element.optional_int("owner", -1)?,
        population: None,
        image: element.image(),
        portrait: element.portrait(),
    };
    loop {
        match source.next_node()? {
            Node::Start(child) if child.is("population") && town.population.is_none() => {
                town.population = Some(community::read_community_stats(&child, source, ctx)?);
            }
            Node::Start(child) => {
                source.reject_child(element, child, "at most one population", ctx)?;
            }
            Node::End(name) if name == element.tag() => return Ok(town),
            Node::End(_) | Node::Text(_) => {}
            Node::Eof => {
                return Err(Error::UnexpectedEof {
                    tag: element.tag().to_owned(),
                })
            }
        }
    }
}

pub fn write_town<W: Write>(sink: &mut XmlSink<W>, fixture: &Town) -> Result<()> {
    let tag = fixture.kind.tag();
    let mut attrs = Attrs::new();
    attrs.push("status", fixture.status);
    attrs.push("size", fixture.size);
    if !fixture.name.is_empty() {
        attrs.push("name", &fixture.name);
    }
    attrs.push("dc", fixture.dc);
    if fixture.owner >= 0 {
        attrs.push("owner", fixture.owner);
    }
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    attrs.push_opt("portrait", fixture.portrait.as_deref());
    sink.element(tag, &attrs, fixture.population.is_some())?;
    if let Some(stats) = &fixture.population {
        community::write_community_stats(sink, stats)?;
        sink.end(tag)?;
    }
    Ok(())
}

pub fn read_village<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Village> {
    expect_tag(element, &["village"])?;
    element.expect_attributes(
        &mut ctx.warner,
        &["status", "name", "race", "owner", "id", "image", "portrait"],
    )?;
    let mut village = Village {
        id: element.object_id(ctx)?,
        status: element.require_enum("status")?,
        name: element.optional_str_or("name", ""),
        race: element.optional_str_or("race", Village::DEFAULT_RACE),
        owner: element.optional_int("owner", -1)?,
        population: None,
        image: element.image(),
        portrait: element.portrait(),
    };
    loop {
        match source.next_node()? {
            Node::Start(child) if child.is("population") && village.population.is_none() => {
                village.population = Some(community::read_community_stats(&child, source, ctx)?);
            }
            Node::Start(child) => {
                source.reject_child(element, child, "at most one population", ctx)?;
            }
            Node::End(name) if name == element.tag() => return Ok(village),
            Node::End(_) | Node::Text(_) => {}
            Node::Eof => {
                return Err(Error::UnexpectedEof {
                    tag: element.tag().to_owned(),
                })
            }
        }
    }
}

pub fn write_village<W: Write>(sink: &mut XmlSink<W>, fixture: &Village) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("status", fixture.status);
    if !fixture.name.is_empty() {
        attrs.push("name", &fixture.name);
    }
    if fixture.race != Village::DEFAULT_RACE {
        attrs.push("race", &fixture.race);
    }
    if fixture.owner >= 0 {
        attrs.push("owner", fixture.owner);
    }
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    attrs.push_opt("portrait", fixture.portrait.as_deref());
    sink.element("village", &attrs, fixture.population.is_some())?;
    if let Some(stats) = &fixture.population {
        community::write_community_stats(sink, stats)?;
        sink.end("village")?;
    }
    Ok(())
}

pub fn read_fortress<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Fortress> {
    expect_tag(element, &["fortress"])?;
    element.expect_attributes(
        &mut ctx.warner,
        &["owner", "name", "size", "id", "image", "portrait"],
    )?;
    let size = match element.optional_str("size") {
        Some(_) => element.require_enum("size")?,
        None => TownSize::Small,
    };
    let mut fortress = Fortress {
        id: element.object_id(ctx)?,
        owner: element.require_int("owner")?,
        name: element.optional_str_or("name", ""),
        size,
        members: Vec::new(),
        image: element.image(),
        portrait: element.portrait(),
    };
    loop {
        match source.next_node()? {
            Node::Start(child) if child.is("unit") => {
                fortress
                    .members
                    .push(FortressMember::Unit(unit::read_unit(&child, source, ctx)?));
            }
            Node::Start(child) if child.is("resource") => {
                fortress.members.push(FortressMember::ResourcePile(
                    resource::read_resource(&child, source, ctx)?,
                ));
            }
            Node::Start(child) if child.is("implement") => {
                fortress.members.push(FortressMember::Implement(
                    resource::read_implement(&child, source, ctx)?,
                ));
            }
            Node::Start(child) => {
                source.reject_child(element, child, "unit, resource, implement", ctx)?;
            }
            Node::End(name) if name == element.tag() => return Ok(fortress),
            Node::End(_) | Node::Text(_) => {}
            Node::Eof => {
                return Err(Error::UnexpectedEof {
                    tag: element.tag().to_owned(),
                })
            }
        }
    }
}

pub fn write_fortress<W: Write>(sink: &mut XmlSink<W>, fixture: &Fortress) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("owner", fixture.owner);
    if !fixture.name.is_empty() {
        attrs.push("name", &fixture.name);
    }
    if fixture.size != TownSize::Small {
        attrs.push("size", fixture.size);
    }
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    attrs.push_opt("portrait", fixture.portrait.as_deref());
    sink.element("fortress", &attrs, !fixture.members.is_empty())?;
    if fixture.members.is_empty() {
        return Ok(());
    }
    for member in &fixture.members {
        match member {
            FortressMember::Unit(u) => unit::write_unit(sink, u)?,
            FortressMember::ResourcePile(r) => resource::write_resource(sink, r)?,
            FortressMember::Implement(i) => resource::write_implement(sink, i)?,
        }
    }
    sink.end("fortress")
}
