//! The `population` aggregate: a bounded stack machine over the
//! multiply-nested community-statistics block.
//!
//! Grammar: `population` may contain `expertise` and `claim` leaves and
//! `production`/`consumption` wrappers; `resource` is only legal directly
//! inside one of the wrappers. Any other nesting is a structural
//! violation, reported with the set of tags that would have been legal.

use std::io::{BufRead, Write};

use spmap_model::fixtures::CommunityStats;

use crate::families::resource;
use crate::sink::{Attrs, XmlSink};
use crate::stream::{expect_tag, Element, Node, XmlSource, FUTURE_TAGS};
use crate::{Error, ParseContext, Result, Warning};

/// One open tag context inside `population`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopulationState {
    Population,
    Expertise,
    Claim,
    Production,
    Consumption,
}

impl PopulationState {
    fn tag(self) -> &'static str {
        match self {
            PopulationState::Population => "population",
            PopulationState::Expertise => "expertise",
            PopulationState::Claim => "claim",
            PopulationState::Production => "production",
            PopulationState::Consumption => "consumption",
        }
    }

    /// The children legal with this state on top of the stack.
    fn legal_children(self) -> &'static str {
        match self {
            PopulationState::Population => "expertise, claim, production, consumption",
            PopulationState::Expertise | PopulationState::Claim => "no children",
            PopulationState::Production | PopulationState::Consumption => "resource",
        }
    }
}

pub fn read_community_stats<R: BufRead>(
    element: &Element,
    source: &mut XmlSource<R>,
    ctx: &mut ParseContext,
) -> Result<CommunityStats> {
    expect_tag(element, &["population"])?;
    element.expect_attributes(&mut ctx.warner, &["size"])?;
    let mut stats = CommunityStats::new(element.require_int("size")?);
    let mut stack = vec![PopulationState::Population];

    loop {
        match source.next_node()? {
            Node::Start(child) => {
                if !child.in_supported_namespace() {
                    source.skip_subtree(&child)?;
                    continue;
                }
                let top = *stack.last().expect("population stack never empties");
                match (top, child.tag()) {
                    (PopulationState::Population, "expertise") => {
                        child.expect_attributes(&mut ctx.warner, &["skill", "level"])?;
                        stats.expertise.insert(
                            child.require_str("skill")?.to_owned(),
                            child.require_int("level")?,
                        );
                        stack.push(PopulationState::Expertise);
                    }
                    (PopulationState::Population, "claim") => {
                        child.expect_attributes(&mut ctx.warner, &["resource"])?;
                        // Soft reference: the pile need not exist yet.
                        stats.worked_fields.push(child.require_int("resource")?);
                        stack.push(PopulationState::Claim);
                    }
                    (PopulationState::Population, "production") => {
                        child.expect_attributes(&mut ctx.warner, &[])?;
                        stack.push(PopulationState::Production);
                    }
                    (PopulationState::Population, "consumption") => {
                        child.expect_attributes(&mut ctx.warner, &[])?;
                        stack.push(PopulationState::Consumption);
                    }
                    (PopulationState::Production, "resource") => {
                        // read_resource consumes the whole subtree.
                        stats
                            .yearly_production
                            .push(resource::read_resource(&child, source, ctx)?);
                    }
                    (PopulationState::Consumption, "resource") => {
                        stats
                            .yearly_consumption
                            .push(resource::read_resource(&child, source, ctx)?);
                    }
                    (_, tag) if FUTURE_TAGS.contains(&tag) => {
                        ctx.warner.handle(Warning::FutureTag {
                            tag: tag.to_owned(),
                            line: child.line,
                        })?;
                        source.skip_subtree(&child)?;
                    }
                    (state, _) => {
                        return Err(Error::UnwantedChild {
                            parent: state.tag().to_owned(),
                            child: child.tag().to_owned(),
                            expected: state.legal_children().to_owned(),
                            line: child.line,
                        })
                    }
                }
            }
            Node::End(name) => {
                let top = *stack.last().expect("population stack never empties");
                if name == element.tag() && top == PopulationState::Population {
                    return Ok(stats);
                }
                if name == top.tag() {
                    stack.pop();
                }
            }
            Node::Text(_) => {}
            Node::Eof => {
                return Err(Error::UnexpectedEof {
                    tag: element.tag().to_owned(),
                })
            }
        }
    }
}

pub fn write_community_stats<W: Write>(
    sink: &mut XmlSink<W>,
    stats: &CommunityStats,
) -> Result<()> {
    let mut attrs = Attrs::new();
    attrs.push("size", stats.population);
    let has_children = !stats.expertise.is_empty()
        || !stats.worked_fields.is_empty()
        || !stats.yearly_production.is_empty()
        || !stats.yearly_consumption.is_empty();
    sink.element("population", &attrs, has_children)?;
    if !has_children {
        return Ok(());
    }
    for (skill, level) in &stats.expertise {
        let mut attrs = Attrs::new();
        attrs.push("skill", skill);
        attrs.push("level", level);
        sink.empty("expertise", &attrs)?;
    }
    for claim in &stats.worked_fields {
        let mut attrs = Attrs::new();
        attrs.push("resource", claim);
        sink.empty("claim", &attrs)?;
    }
    if !stats.yearly_production.is_empty() {
        sink.start("production", &Attrs::new())?;
        for pile in &stats.yearly_production {
            resource::write_resource(sink, pile)?;
        }
        sink.end("production")?;
    }
    if !stats.yearly_consumption.is_empty() {
        sink.start("consumption", &Attrs::new())?;
        for pile in &stats.yearly_consumption {
            resource::write_resource(sink, pile)?;
        }
        sink.end("consumption")?;
    }
    sink.end("population")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Result<(CommunityStats, Vec<Warning>)> {
        let mut source = XmlSource::new(xml.as_bytes());
        let mut ctx = ParseContext::permissive();
        let element = source.next_start()?.expect("no population element");
        let stats = read_community_stats(&element, &mut source, &mut ctx)?;
        Ok((stats, ctx.warner.into_recorded()))
    }

    #[test]
    fn full_population_block_parses() {
        let (stats, warnings) = parse(
            "<population size=\"240\">\
             <expertise skill=\"farming\" level=\"3\"/>\
             <claim resource=\"7\"/>\
             <production>\
             <resource kind=\"food\" contents=\"wheat\" quantity=\"30\" id=\"11\"/>\
             </production>\
             <consumption>\
             <resource kind=\"food\" contents=\"wheat\" quantity=\"28\" id=\"12\"/>\
             </consumption>\
             </population>",
        )
        .unwrap();
        assert_eq!(stats.population, 240);
        assert_eq!(stats.expertise.get("farming"), Some(&3));
        assert_eq!(stats.worked_fields, vec![7]);
        assert_eq!(stats.yearly_production.len(), 1);
        assert_eq!(stats.yearly_consumption.len(), 1);
        assert!(warnings.is_empty());
    }

    #[test]
    fn claims_are_soft_references() {
        // The claimed pile ID does not exist anywhere; still fine.
        let (stats, _) =
            parse("<population size=\"5\"><claim resource=\"9999\"/></population>").unwrap();
        assert_eq!(stats.worked_fields, vec![9999]);
    }

    #[test]
    fn resource_outside_wrapper_names_legal_tags() {
        let result = parse(
            "<population size=\"5\">\
             <resource kind=\"food\" contents=\"fish\" quantity=\"1\" id=\"1\"/>\
             </population>",
        );
        let Err(Error::UnwantedChild {
            parent, expected, ..
        }) = result
        else {
            panic!("expected unwanted-child error");
        };
        assert_eq!(parent, "population");
        assert!(expected.contains("production"));
    }

    #[test]
    fn nested_wrapper_is_rejected() {
        let result = parse(
            "<population size=\"5\"><production><production/></production></population>",
        );
        let Err(Error::UnwantedChild { parent, .. }) = result else {
            panic!("expected unwanted-child error");
        };
        assert_eq!(parent, "production");
    }

    #[test]
    fn claim_may_not_have_children() {
        let result = parse(
            "<population size=\"5\"><claim resource=\"1\"><expertise/></claim></population>",
        );
        assert!(matches!(result, Err(Error::UnwantedChild { .. })));
    }

    #[test]
    fn stats_round_trip() {
        let xml = "<population size=\"240\">\
             <expertise skill=\"farming\" level=\"3\"/>\
             <expertise skill=\"fishing\" level=\"1\"/>\
             <claim resource=\"7\"/>\
             <production>\
             <resource kind=\"food\" contents=\"wheat\" quantity=\"30\" id=\"11\"/>\
             </production>\
             </population>";
        let (stats, _) = parse(xml).unwrap();
        let mut out = Vec::new();
        {
            let mut sink = XmlSink::new(&mut out);
            write_community_stats(&mut sink, &stats).unwrap();
        }
        let rendered = String::from_utf8(out).unwrap();
        let (reparsed, _) = parse(&rendered).unwrap();
        assert_eq!(reparsed, stats);
    }
}
