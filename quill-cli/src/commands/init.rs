//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../quill.yml.example");

/// Initialize a new quill project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_content(root)?;

    println!("✓ quill initialized in {:?}", root);
    println!("  - Edit quill.yml to customize site metadata");
    println!("  - Write posts in content/blog/, pages anywhere else under content/");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("quill.yml");
    if config_path.exists() {
        println!("quill.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_content(root: &Path) -> Result<()> {
    let content = root.join("content");
    let blog = content.join("blog");
    let snippets = root.join("snippets");

    for dir in [&content, &blog, &snippets] {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    let sample = blog.join("hello-world.md");
    if !sample.exists() {
        fs::write(&sample, sample_post())?;
        println!("Created {:?}", sample);
    }

    let about = content.join("about.md");
    if !about.exists() {
        fs::write(&about, sample_about())?;
        println!("Created {:?}", about);
    }

    let authors = root.join("authors.yml");
    if !authors.exists() {
        fs::write(&authors, "- key: me\n  name: Your Name\n")?;
        println!("Created {:?}", authors);
    }

    Ok(())
}

fn sample_post() -> String {
    r#"---
title: Hello, World
date: 2025-01-01
author: me
tags: [meta]
---

Welcome to your new blog :tada:

Write posts as markdown files under `content/blog/`. Each post needs a
`title` and a `date`; set `draft: true` to keep one out of the feed and
listings while you work on it.

Embed a snippet from the `snippets/` directory with a paragraph of its own:

```text
`gist:demo/example.rs`
```
"#
    .to_string()
}

fn sample_about() -> String {
    r#"---
title: About
---

Pages outside `content/blog/` are rendered as standalone pages. This one
lives at `/about/`.
"#
    .to_string()
}
