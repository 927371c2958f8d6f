//! Streaming XML reader and writer for spmap world-map documents.
//!
//! The entry points are [`read_map`] and [`write_map`]. Everything else
//! is the machinery underneath: the error/warning taxonomy, the per-parse
//! [`ParseContext`] with its ID registry, the event-stream wrapper with
//! line tracking and namespace tolerance, the typed attribute accessors,
//! per-family element readers/writers, and tag dispatch.

mod attr;
mod context;
pub mod dispatch;
mod error;
pub mod families;
mod ids;
pub mod map;
pub mod sink;
pub mod stream;
mod warning;

pub use context::ParseContext;
pub use error::{Error, Result};
pub use ids::IdRegistry;
pub use map::{read_map, write_map};
pub use stream::SP_NAMESPACE;
pub use warning::{Warner, Warning};

#[cfg(test)]
pub(crate) mod test_util {
    use spmap_model::Fixture;

    use crate::dispatch::{read_fixture, write_fixture};
    use crate::sink::XmlSink;
    use crate::stream::XmlSource;
    use crate::{Error, ParseContext, Result, Warning};

    /// Parses a single fixture element under the permissive policy.
    pub fn parse_fixture(xml: &str) -> Result<(Fixture, Vec<Warning>)> {
        let mut source = XmlSource::new(xml.as_bytes());
        let mut ctx = ParseContext::permissive();
        let element = source.next_start()?.ok_or(Error::MissingMapElement)?;
        let fixture = read_fixture(&element, &mut source, &mut ctx)?;
        Ok((fixture, ctx.warner.into_recorded()))
    }

    /// Renders a single fixture the way the map writer would.
    pub fn write_fixture_string(fixture: &Fixture) -> String {
        let mut out = Vec::new();
        {
            let mut sink = XmlSink::new(&mut out);
            write_fixture(&mut sink, fixture).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    /// Writes a fixture and reads it back.
    pub fn roundtrip(fixture: &Fixture) -> Fixture {
        let xml = write_fixture_string(fixture);
        let (reread, _) = parse_fixture(&xml)
            .unwrap_or_else(|e| panic!("round trip failed for {xml:?}: {e}"));
        reread
    }
}
