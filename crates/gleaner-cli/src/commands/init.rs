//! Initialize a new Gleaner project

use anyhow::Result;
use std::fs;
use std::path::Path;

use gleaner_core::config::CONFIG_FILE;

/// Run the init command
pub fn run(path: &str, name: Option<&str>) -> Result<()> {
    let project_dir = Path::new(path);

    // Create directory if it doesn't exist
    if !project_dir.exists() {
        fs::create_dir_all(project_dir)?;
    }

    // Get absolute path for deriving name
    let abs_path = project_dir.canonicalize()?;

    // Derive project name from directory name if not provided
    let project_name = match name {
        Some(n) => n.to_string(),
        None => abs_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Could not determine project name from path"))?,
    };

    // Check if already initialized
    if project_dir.join(CONFIG_FILE).exists() {
        anyhow::bail!(
            "Directory '{}' already contains a {}",
            project_dir.display(),
            CONFIG_FILE
        );
    }

    tracing::info!("Creating new Gleaner project: {}", project_name);

    fs::create_dir_all(project_dir.join("data"))?;
    fs::create_dir_all(project_dir.join("templates"))?;

    let config = format!(
        r#"# Gleaner Project Configuration
name: {project_name}
description: Collect names from a document and render a greeting

pipes:
  - name: people
    source:
      type: file
      path: data/people.json
    collectors:
      # Every `name` field, spliced into one list
      - query: "$[*].name"
        target: data.people.names
        policy: extend
      # Whole records, kept as one batch per document
      - query: "$[*]"
        target: data.batches
        policy: append

sinks:
  - type: template
    template: templates/people.txt.j2
    output: output/people.txt
"#
    );
    fs::write(project_dir.join(CONFIG_FILE), config)?;

    let sample_data = r#"[
  {"name": "Ann", "role": "editor"},
  {"name": "Bo", "role": "reviewer"}
]
"#;
    fs::write(project_dir.join("data/people.json"), sample_data)?;

    let template = r#"Hello {{ data.people.names[0] }}
{% for name in data.people.names -%}
- {{ name }}
{% endfor -%}
{{ data.batches | length }} batch(es) collected
"#;
    fs::write(project_dir.join("templates/people.txt.j2"), template)?;

    let gitignore = r#"# Rendered output
output/
"#;
    fs::write(project_dir.join(".gitignore"), gitignore)?;

    tracing::info!(
        "✓ Created project '{}' at {}",
        project_name,
        abs_path.display()
    );
    tracing::info!("");
    tracing::info!("Next steps:");
    if path != "." {
        tracing::info!("  cd {}", project_dir.display());
    }
    tracing::info!("  gleaner validate    # Check configuration");
    tracing::info!("  gleaner collect     # Inspect the collected store");
    tracing::info!("  gleaner run         # Render outputs");

    Ok(())
}
