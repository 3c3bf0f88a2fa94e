//! Sinks that render a finished store
//!
//! A sink is the only place a run produces output. Every top-level key of
//! the store is bound as a template variable, so a store holding
//! `data.people.names` is reachable as `{{ data.people.names }}`.

use std::fmt;
use std::path::PathBuf;

use minijinja::Environment;

use crate::error::{Error, Result};
use crate::store::PathStore;

/// Consumer of a populated store
pub trait Sink: fmt::Debug {
    /// Produce output from `store`
    fn send(&self, store: &PathStore) -> Result<()>;

    /// Short human-readable destination, used in logs
    fn describe(&self) -> String;
}

/// Render `template` with the store's top-level keys as variables
pub fn render_template(template: &str, store: &PathStore) -> Result<String> {
    let env = Environment::new();
    Ok(env.render_str(template, store.as_map())?)
}

/// Renders a Jinja template file and writes the result to an output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFileSink {
    template_path: PathBuf,
    output_path: PathBuf,
}

impl TemplateFileSink {
    /// Create a sink reading `template_path` and writing `output_path`
    pub fn new(template_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            output_path: output_path.into(),
        }
    }
}

impl Sink for TemplateFileSink {
    fn send(&self, store: &PathStore) -> Result<()> {
        let template =
            std::fs::read_to_string(&self.template_path).map_err(Error::io(&self.template_path))?;
        let rendered = render_template(&template, store)?;

        if let Some(parent) = self.output_path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::io(parent))?;
        }
        std::fs::write(&self.output_path, rendered).map_err(Error::io(&self.output_path))?;

        tracing::info!(
            "Rendered {} -> {}",
            self.template_path.display(),
            self.output_path.display()
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.output_path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_path::KeyPath;
    use serde_json::json;

    fn people_store() -> PathStore {
        let mut store = PathStore::new();
        store.extend(
            &KeyPath::parse("data.people.names").unwrap(),
            vec![json!("Ann"), json!("Bo")],
        );
        store
    }

    #[test]
    fn test_render_indexes_nested_list() {
        let rendered =
            render_template("Hello {{ data.people.names[0] }}", &people_store()).unwrap();
        assert_eq!(rendered, "Hello Ann");
    }

    #[test]
    fn test_render_loops_over_list() {
        let rendered = render_template(
            "{% for n in data.people.names %}{{ n }};{% endfor %}",
            &people_store(),
        )
        .unwrap();
        assert_eq!(rendered, "Ann;Bo;");
    }

    #[test]
    fn test_render_syntax_error() {
        let err = render_template("{% for %}", &people_store()).unwrap_err();
        assert!(matches!(err, Error::TemplateError(_)));
    }

    #[test]
    fn test_template_file_sink_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("people.txt.j2");
        let output = dir.path().join("out/nested/people.txt");
        std::fs::write(&template, "Hello {{ data.people.names[1] }}").unwrap();

        let sink = TemplateFileSink::new(&template, &output);
        sink.send(&people_store()).unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "Hello Bo");
        assert_eq!(sink.describe(), output.display().to_string());
    }

    #[test]
    fn test_template_file_sink_overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("t.j2");
        let output = dir.path().join("out.txt");
        std::fs::write(&template, "{{ data.people.names | length }}").unwrap();
        std::fs::write(&output, "stale contents that are longer").unwrap();

        TemplateFileSink::new(&template, &output)
            .send(&people_store())
            .unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "2");
    }

    #[test]
    fn test_missing_template_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let sink = TemplateFileSink::new(dir.path().join("nope.j2"), dir.path().join("out.txt"));
        let err = sink.send(&PathStore::new()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!dir.path().join("out.txt").exists());
    }
}
