use fleetsnap_core::{ClusterSnapshot, Renderer};
use std::io::{self, Write};

/// Writes each snapshot as a single JSON line
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, snapshot: &ClusterSnapshot) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n")?;
        // flush per line so consumers see each cluster as it lands
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures;

    #[test]
    fn test_one_line_per_snapshot() {
        let mut buf = Vec::new();
        {
            let mut renderer = JsonRenderer::new(&mut buf);
            renderer.render(&fixtures::snapshot()).unwrap();
            renderer.render(&fixtures::snapshot()).unwrap();
            renderer.finish().unwrap();
        }

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["cluster"]["name"], "prod");
        assert_eq!(value["services"][0]["running_count"], 1);
        assert_eq!(value["tasks"].as_array().unwrap().len(), 2);
        assert_eq!(value["instance_pairings"][0]["instance_id"], "i-0abc");
    }

    #[test]
    fn test_output_parses_back_to_snapshot() {
        let mut buf = Vec::new();
        JsonRenderer::new(&mut buf)
            .render(&fixtures::snapshot())
            .unwrap();

        let parsed: ClusterSnapshot = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, fixtures::snapshot());
    }
}
