//! The `unit` element with its member roster and per-turn orders, and the
//! `worker` element with jobs, stats, and notes.

use std::io::{BufRead, Write};

use spmap_model::fixtures::{Job, Skill, Unit, Worker, WorkerStats};
use spmap_model::UnitMember;

use crate::families::{mobile, resource};
use crate::sink::{Attrs, XmlSink};
use crate::stream::{expect_tag, Element, Node, XmlSource};
use crate::{Error, ParseContext, Result};

pub fn read_unit<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Unit> {
    expect_tag(element, &["unit"])?;
    element.expect_attributes(
        &mut ctx.warner,
        &["owner", "kind", "type", "name", "id", "image", "portrait"],
    )?;
    let kind = element.with_deprecated_alias("kind", "type", &mut ctx.warner)?;
    let mut unit = Unit::new(
        element.object_id(ctx)?,
        element.require_int("owner")?,
        kind,
        element.optional_str_or("name", ""),
    );
    unit.image = element.image();
    unit.portrait = element.portrait();
    loop {
        match source.next_node()? {
            Node::Start(child) if child.is("worker") => {
                unit.members
                    .push(UnitMember::Worker(read_worker(&child, source, ctx)?));
            }
            Node::Start(child) if child.is("animal") => {
                unit.members
                    .push(UnitMember::Animal(mobile::read_animal(&child, source, ctx)?));
            }
            Node::Start(child) if child.is("resource") => {
                unit.members.push(UnitMember::ResourcePile(
                    resource::read_resource(&child, source, ctx)?,
                ));
            }
            Node::Start(child) if child.is("implement") => {
                unit.members.push(UnitMember::Implement(
                    resource::read_implement(&child, source, ctx)?,
                ));
            }
            Node::Start(child) if child.is("orders") => {
                child.expect_attributes(&mut ctx.warner, &["turn"])?;
                let turn = child.optional_int("turn", -1)?;
                unit.orders.insert(turn, source.text_content(&child, ctx)?);
            }
            Node::Start(child) if child.is("results") => {
                child.expect_attributes(&mut ctx.warner, &["turn"])?;
                let turn = child.optional_int("turn", -1)?;
                unit.results.insert(turn, source.text_content(&child, ctx)?);
            }
            Node::Start(child) => {
                source.reject_child(
                    element,
                    child,
                    "worker, animal, resource, implement, orders, results",
                    ctx,
                )?;
            }
            Node::End(name) if name == element.tag() => return Ok(unit),
            Node::End(_) | Node::Text(_) => {}
            Node::Eof => {
                return Err(Error::UnexpectedEof {
                    tag: element.tag().to_owned(),
                })
            }
        }
    }
}

pub fn write_unit<W: Write>(sink: &mut XmlSink<W>, fixture: &Unit) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("owner", fixture.owner);
    attrs.push("kind", &fixture.kind);
    if !fixture.name.is_empty() {
        attrs.push("name", &fixture.name);
    }
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    attrs.push_opt("portrait", fixture.portrait.as_deref());
    let has_children =
        !fixture.members.is_empty() || !fixture.orders.is_empty() || !fixture.results.is_empty();
    sink.element("unit", &attrs, has_children)?;
    if !has_children {
        return Ok(());
    }
    for member in &fixture.members {
        match member {
            UnitMember::Worker(w) => write_worker(sink, w)?,
            UnitMember::Animal(a) => mobile::write_animal(sink, a)?,
            UnitMember::ResourcePile(r) => resource::write_resource(sink, r)?,
            UnitMember::Implement(i) => resource::write_implement(sink, i)?,
        }
    }
    // Orders and results are keyed maps, so iteration is already sorted
    // by turn and the output is stable.
    for (turn, text) in &fixture.orders {
        write_turn_text(sink, "orders", *turn, text)?;
    }
    for (turn, text) in &fixture.results {
        write_turn_text(sink, "results", *turn, text)?;
    }
    sink.end("unit")
}

fn write_turn_text<W: Write>(
    sink: &mut XmlSink<W>,
    tag: &str,
    turn: i32,
    text: &str,
) -> Result<()> {
    let mut attrs = Attrs::new();
    if turn >= 0 {
        attrs.push("turn", turn);
    }
    sink.start(tag, &attrs)?;
    sink.text(text)?;
    sink.end(tag)
}

pub fn read_worker<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Worker> {
    expect_tag(element, &["worker"])?;
    element.expect_attributes(
        &mut ctx.warner,
        &["name", "race", "id", "image", "portrait"],
    )?;
    let mut worker = Worker::new(element.object_id(ctx)?, element.require_str("name")?);
    worker.race = element.optional_str_or("race", Worker::DEFAULT_RACE);
    worker.image = element.image();
    worker.portrait = element.portrait();
    loop {
        match source.next_node()? {
            Node::Start(child) if child.is("job") => {
                worker.jobs.push(read_job(&child, source, ctx)?);
            }
            Node::Start(child) if child.is("stats") && worker.stats.is_none() => {
                child.expect_attributes(
                    &mut ctx.warner,
                    &["hp", "max", "str", "dex", "con", "int", "wis", "cha"],
                )?;
                worker.stats = Some(WorkerStats {
                    hit_points: child.require_int("hp")?,
                    max_hit_points: child.require_int("max")?,
                    strength: child.require_int("str")?,
                    dexterity: child.require_int("dex")?,
                    constitution: child.require_int("con")?,
                    intelligence: child.require_int("int")?,
                    wisdom: child.require_int("wis")?,
                    charisma: child.require_int("cha")?,
                });
                source.spin_to_end(&child, ctx)?;
            }
            Node::Start(child) if child.is("note") => {
                child.expect_attributes(&mut ctx.warner, &["player"])?;
                let player = child.require_int("player")?;
                worker.notes.push((player, source.text_content(&child, ctx)?));
            }
            Node::Start(child) => {
                source.reject_child(element, child, "job, stats, note", ctx)?;
            }
            Node::End(name) if name == element.tag() => return Ok(worker),
            Node::End(_) | Node::Text(_) => {}
            Node::Eof => {
                return Err(Error::UnexpectedEof {
                    tag: element.tag().to_owned(),
                })
            }
        }
    }
}

fn read_job<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<Job> {
    element.expect_attributes(&mut ctx.warner, &["name", "level"])?;
    let mut job = Job {
        name: element.require_str("name")?.to_owned(),
        level: element.require_int("level")?,
        skills: Vec::new(),
    };
    loop {
        match source.next_node()? {
            Node::Start(child) if child.is("skill") => {
                child.expect_attributes(&mut ctx.warner, &["name", "level", "hours"])?;
                job.skills.push(Skill {
                    name: child.require_str("name")?.to_owned(),
                    level: child.require_int("level")?,
                    hours: child.require_int("hours")?,
                });
                source.spin_to_end(&child, ctx)?;
            }
            Node::Start(child) => {
                source.reject_child(element, child, "skill", ctx)?;
            }
            Node::End(name) if name == element.tag() => return Ok(job),
            Node::End(_) | Node::Text(_) => {}
            Node::Eof => {
                return Err(Error::UnexpectedEof {
                    tag: element.tag().to_owned(),
                })
            }
        }
    }
}

pub fn write_worker<W: Write>(sink: &mut XmlSink<W>, fixture: &Worker) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("name", &fixture.name);
    if fixture.race != Worker::DEFAULT_RACE {
        attrs.push("race", &fixture.race);
    }
    attrs.push("id", fixture.id);
    attrs.push_opt("image", fixture.image.as_deref());
    attrs.push_opt("portrait", fixture.portrait.as_deref());
    let has_children =
        !fixture.jobs.is_empty() || fixture.stats.is_some() || !fixture.notes.is_empty();
    sink.element("worker", &attrs, has_children)?;
    if !has_children {
        return Ok(());
    }
    for job in &fixture.jobs {
        let mut attrs = Attrs::new();
        attrs.push("name", &job.name);
        attrs.push("level", job.level);
        sink.element("job", &attrs, !job.skills.is_empty())?;
        if !job.skills.is_empty() {
            for skill in &job.skills {
                let mut attrs = Attrs::new();
                attrs.push("name", &skill.name);
                attrs.push("level", skill.level);
                attrs.push("hours", skill.hours);
                sink.empty("skill", &attrs)?;
            }
            sink.end("job")?;
        }
    }
    if let Some(stats) = &fixture.stats {
        let mut attrs = Attrs::new();
        attrs.push("hp", stats.hit_points);
        attrs.push("max", stats.max_hit_points);
        attrs.push("str", stats.strength);
        attrs.push("dex", stats.dexterity);
        attrs.push("con", stats.constitution);
        attrs.push("int", stats.intelligence);
        attrs.push("wis", stats.wisdom);
        attrs.push("cha", stats.charisma);
        sink.empty("stats", &attrs)?;
    }
    for (player, text) in &fixture.notes {
        let mut attrs = Attrs::new();
        attrs.push("player", player);
        sink.start("note", &attrs)?;
        sink.text(text)?;
        sink.end("note")?;
    }
    sink.end("worker")
}

#[cfg(test)]
mod tests {
    use spmap_model::fixtures::{Animal, Job, Skill, Unit, Worker, WorkerStats};
    use spmap_model::{Fixture, UnitMember};

    use crate::test_util::{parse_fixture, roundtrip, write_fixture_string};
    use crate::{Error, Warning};

    fn scout_unit() -> Unit {
        let mut unit = Unit::new(40, 1, "scouts", "eyes of the north");
        let mut worker = Worker::new(41, "Andvari");
        worker.jobs.push(Job {
            name: "hunter".into(),
            level: 2,
            skills: vec![Skill {
                name: "tracking".into(),
                level: 3,
                hours: 20,
            }],
        });
        worker.stats = Some(WorkerStats {
            hit_points: 8,
            max_hit_points: 10,
            strength: 12,
            dexterity: 14,
            constitution: 11,
            intelligence: 10,
            wisdom: 13,
            charisma: 9,
        });
        worker.notes.push((1, "limping since the ambush".into()));
        unit.members.push(UnitMember::Worker(worker));
        unit.members.push(UnitMember::Animal(Animal {
            id: 42,
            kind: "horse".into(),
            talking: false,
            status: Animal::DEFAULT_STATUS.into(),
            born: -1,
            count: 1,
            image: None,
        }));
        unit.orders.insert(3, "scout northeast".into());
        unit.orders.insert(1, "rest".into());
        unit.results.insert(3, "found a cave".into());
        unit
    }

    #[test]
    fn unit_round_trips_with_members_and_orders() {
        let fixture = Fixture::Unit(scout_unit());
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn empty_unit_is_self_closing() {
        let fixture = Fixture::Unit(Unit::new(4, 0, "garrison", ""));
        assert_eq!(
            write_fixture_string(&fixture),
            "<unit owner=\"0\" kind=\"garrison\" id=\"4\"/>"
        );
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn unit_accepts_deprecated_type_alias() {
        let (fixture, warnings) =
            parse_fixture("<unit owner=\"1\" type=\"scouts\" id=\"2\"/>").unwrap();
        let Fixture::Unit(unit) = &fixture else {
            panic!("wrong variant");
        };
        assert_eq!(unit.kind, "scouts");
        assert!(matches!(
            warnings.as_slice(),
            [Warning::DeprecatedProperty {
                deprecated: "type",
                ..
            }]
        ));
    }

    #[test]
    fn orders_without_turn_use_the_sentinel_key() {
        let (fixture, _) = parse_fixture(
            "<unit owner=\"1\" kind=\"scouts\" id=\"2\"><orders>hold</orders></unit>",
        )
        .unwrap();
        let Fixture::Unit(unit) = &fixture else {
            panic!("wrong variant");
        };
        assert_eq!(unit.orders.get(&-1).map(String::as_str), Some("hold"));
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn later_orders_for_a_turn_replace_earlier_ones() {
        let (fixture, _) = parse_fixture(
            "<unit owner=\"1\" kind=\"scouts\" id=\"2\">\
             <orders turn=\"3\">advance</orders>\
             <orders turn=\"3\">retreat</orders>\
             </unit>",
        )
        .unwrap();
        let Fixture::Unit(unit) = &fixture else {
            panic!("wrong variant");
        };
        assert_eq!(unit.orders.get(&3).map(String::as_str), Some("retreat"));
    }

    #[test]
    fn worker_stats_require_all_eight_attributes() {
        let result = parse_fixture(
            "<unit owner=\"1\" kind=\"scouts\" id=\"2\">\
             <worker name=\"Bo\" id=\"3\"><stats hp=\"5\" max=\"10\"/></worker>\
             </unit>",
        );
        assert!(matches!(
            result,
            Err(Error::MissingProperty {
                attribute: "str",
                ..
            })
        ));
    }

    #[test]
    fn worker_non_default_race_round_trips() {
        let (fixture, _) = parse_fixture(
            "<unit owner=\"1\" kind=\"scouts\" id=\"2\">\
             <worker name=\"Durin\" race=\"dwarf\" id=\"3\"/>\
             </unit>",
        )
        .unwrap();
        let Fixture::Unit(unit) = &fixture else {
            panic!("wrong variant");
        };
        let UnitMember::Worker(worker) = &unit.members[0] else {
            panic!("wrong member");
        };
        assert_eq!(worker.race, "dwarf");
        assert_eq!(roundtrip(&fixture), fixture);
    }

    #[test]
    fn unknown_child_of_unit_is_rejected() {
        let result = parse_fixture(
            "<unit owner=\"1\" kind=\"scouts\" id=\"2\"><village status=\"active\"/></unit>",
        );
        let Err(Error::UnwantedChild { expected, .. }) = result else {
            panic!("expected unwanted-child error");
        };
        assert!(expected.contains("worker"));
    }
}
