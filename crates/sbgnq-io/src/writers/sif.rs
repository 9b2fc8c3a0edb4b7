//! SIF (Simple Interaction Format) writer: one `source sign target` line
//! per influence, `sign` rendered as `+`/`-`.

use sbgnq_core::{Influence, Model};
use std::io::Write;

use crate::error::Result;
use crate::names::named_influences;

pub fn write<W: Write>(model: &Model, influences: &[Influence], mut out: W) -> Result<()> {
    for named in named_influences(model, influences) {
        writeln!(out, "{} {} {}", named.source, named.sign.as_str(), named.target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbgnq_compile::abstract_influences;
    use sbgnq_core::fixtures::catalysis_with_inhibitor;

    #[test]
    fn writes_one_line_per_influence() {
        let model = catalysis_with_inhibitor();
        let influences = abstract_influences(&model);

        let mut out = Vec::new();
        write(&model, &influences, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), influences.len());
        assert!(text.lines().any(|l| l.ends_with(" - P") || l.contains(" - ")));
    }
}
