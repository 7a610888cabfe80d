//! Built-in template library.
//!
//! This module provides [`builtin_catalog`], the single entry-point for the
//! Python plugin templates that ship inside the binary. Bodies live under
//! `templates/python/` in this crate and are compiled in with
//! `include_str!`, so the catalog never depends on the working directory.
//!
//! # Pairs
//!
//! | Category | Subtypes |
//! |----------|----------|
//! | `tool` | `provider`, `tool-action` |
//! | `model` | `provider`, `llm`, `text-embedding`, `rerank`, `tts`, `speech2text`, `moderation` |
//! | `agent-strategy` | `strategy` |
//! | `extension` | `endpoint` |
//!
//! Every pair except `tool/tool-action` scaffolds a whole project and starts
//! with the common project files (manifest, entrypoint, docs, workflow,
//! icon). `tool/tool-action` only adds one tool module to an existing
//! plugin.
//!
//! # Sharing
//!
//! [`shared_catalog`] builds the catalog once per process and hands out
//! `Arc` clones; the catalog is immutable after construction.

use std::sync::{Arc, OnceLock};

use tracing::{debug, instrument};

use plugforge_core::domain::{
    Category, DomainError, Subtype, TemplateCatalog, TemplateContent, TemplateEntry,
};

macro_rules! python_template {
    ($path:literal) => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/templates/python/",
            $path
        ))
    };
}

/// One compiled-in file: output path template and body.
struct FileSpec {
    key: &'static str,
    path: &'static str,
    body: &'static str,
    literal: bool,
}

const fn file(key: &'static str, path: &'static str, body: &'static str) -> FileSpec {
    FileSpec {
        key,
        path,
        body,
        literal: false,
    }
}

// ── Common project files ──────────────────────────────────────────────────────

const COMMON: &[FileSpec] = &[
    file("manifest", "manifest.yaml", python_template!("common/manifest.yaml")),
    file("main", "main.py", python_template!("common/main.py")),
    file("requirements", "requirements.txt", python_template!("common/requirements.txt")),
    file("readme", "README.md", python_template!("common/README.md")),
    file("guide", "GUIDE.md", python_template!("common/GUIDE.md")),
    file("privacy", "PRIVACY.md", python_template!("common/PRIVACY.md")),
    file("env_example", ".env.example", python_template!("common/env.example")),
    file("difyignore", ".difyignore", python_template!("common/difyignore")),
    FileSpec {
        key: "publish_workflow",
        path: ".github/workflows/plugin-publish.yml",
        body: python_template!("common/plugin-publish.yml"),
        // GitHub expressions use `${{ ... }}`
        literal: true,
    },
    file("icon", "_assets/icon.svg", python_template!("common/icon.svg")),
];

// ── Category files ────────────────────────────────────────────────────────────

const TOOL_PROVIDER: &[FileSpec] = &[
    file("provider_yaml", "provider/{{ name }}.yaml", python_template!("tool/provider.yaml")),
    file("provider_py", "provider/{{ name }}.py", python_template!("tool/provider.py")),
];

const TOOL_ACTION: &[FileSpec] = &[
    file("tool_yaml", "tools/{{ name }}.yaml", python_template!("tool/tool.yaml")),
    file("tool_py", "tools/{{ name }}.py", python_template!("tool/tool.py")),
];

const MODEL_PROVIDER: &[FileSpec] = &[
    file("provider_yaml", "provider/{{ name }}.yaml", python_template!("model/provider.yaml")),
    file("provider_py", "provider/{{ name }}.py", python_template!("model/provider.py")),
];

const MODEL_TYPED_PROVIDER: &[FileSpec] = &[
    file(
        "provider_yaml",
        "provider/{{ name }}.yaml",
        python_template!("model/provider_typed.yaml"),
    ),
    file("provider_py", "provider/{{ name }}.py", python_template!("model/provider.py")),
];

const MODEL_YAML_PATH: &str = "models/{{ subtype_snake }}/{{ subtype_snake }}.yaml";
const MODEL_PY_PATH: &str = "models/{{ subtype_snake }}/{{ subtype_snake }}.py";

/// (subtype, model declaration, model implementation)
const MODEL_TYPES: &[(&str, &str, &str)] = &[
    ("llm", python_template!("model/llm.yaml"), python_template!("model/llm.py")),
    (
        "text-embedding",
        python_template!("model/text_embedding.yaml"),
        python_template!("model/text_embedding.py"),
    ),
    ("rerank", python_template!("model/rerank.yaml"), python_template!("model/rerank.py")),
    ("tts", python_template!("model/tts.yaml"), python_template!("model/tts.py")),
    (
        "speech2text",
        python_template!("model/speech2text.yaml"),
        python_template!("model/speech2text.py"),
    ),
    (
        "moderation",
        python_template!("model/moderation.yaml"),
        python_template!("model/moderation.py"),
    ),
];

const AGENT_STRATEGY: &[FileSpec] = &[
    file("provider_yaml", "provider/{{ name }}.yaml", python_template!("agent/provider.yaml")),
    file("provider_py", "provider/{{ name }}.py", python_template!("agent/provider.py")),
    file("strategy_yaml", "strategies/{{ name }}.yaml", python_template!("agent/strategy.yaml")),
    file("strategy_py", "strategies/{{ name }}.py", python_template!("agent/strategy.py")),
];

const EXTENSION_ENDPOINT: &[FileSpec] = &[
    file("group_yaml", "group/{{ name }}.yaml", python_template!("endpoint/group.yaml")),
    file("endpoint_yaml", "endpoints/{{ name }}.yaml", python_template!("endpoint/endpoint.yaml")),
    file("endpoint_py", "endpoints/{{ name }}.py", python_template!("endpoint/endpoint.py")),
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Build the frozen catalog of every builtin template.
///
/// # Errors
///
/// Only on a duplicate registration, which would be a bug in the tables
/// above.
#[instrument]
pub fn builtin_catalog() -> Result<TemplateCatalog, DomainError> {
    let mut entries = Vec::new();

    push_pair(&mut entries, Category::Tool, "provider", &[COMMON, TOOL_PROVIDER, TOOL_ACTION])?;
    push_pair(&mut entries, Category::Tool, Subtype::TOOL_ACTION, &[TOOL_ACTION])?;
    push_pair(&mut entries, Category::Model, Subtype::PROVIDER, &[COMMON, MODEL_PROVIDER])?;

    for &(subtype, yaml, py) in MODEL_TYPES {
        let model_files = [
            file("model_yaml", MODEL_YAML_PATH, yaml),
            file("model_py", MODEL_PY_PATH, py),
        ];
        push_pair(
            &mut entries,
            Category::Model,
            subtype,
            &[COMMON, MODEL_TYPED_PROVIDER, &model_files],
        )?;
    }

    push_pair(&mut entries, Category::AgentStrategy, "strategy", &[COMMON, AGENT_STRATEGY])?;
    push_pair(&mut entries, Category::Extension, "endpoint", &[COMMON, EXTENSION_ENDPOINT])?;

    let catalog = TemplateCatalog::builder().register_all(entries)?.build()?;
    debug!(entries = catalog.len(), pairs = catalog.pairs().len(), "Builtin catalog built");
    Ok(catalog)
}

/// Process-wide builtin catalog, built on first use.
pub fn shared_catalog() -> Result<Arc<TemplateCatalog>, DomainError> {
    static CATALOG: OnceLock<Result<Arc<TemplateCatalog>, DomainError>> = OnceLock::new();
    CATALOG
        .get_or_init(|| builtin_catalog().map(Arc::new))
        .clone()
}

fn push_pair(
    entries: &mut Vec<TemplateEntry>,
    category: Category,
    subtype: &str,
    groups: &[&[FileSpec]],
) -> Result<(), DomainError> {
    let parsed = Subtype::parse(subtype)?;

    for spec in groups.iter().flat_map(|g| g.iter()) {
        let content = if spec.literal {
            TemplateContent::Literal(spec.body.into())
        } else {
            TemplateContent::Parameterized(spec.body.into())
        };
        entries.push(TemplateEntry::new(
            format!("{category}/{subtype}/{}", spec.key),
            category,
            parsed.clone(),
            spec.path,
            content,
        ));
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
