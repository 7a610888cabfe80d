//! Token substitution: the render context and the pipeline renderer.
//!
//! ## Token grammar
//!
//! ```text
//! token := "{{" ws field ws ( "|" ws stage ws )* "}}"
//! field := [A-Za-z_][A-Za-z0-9_]*      (an optional leading "." is accepted)
//! stage := [A-Za-z_][A-Za-z0-9_]*
//! ws    := [ \t]*
//! ```
//!
//! Everything outside a token is copied verbatim. There are no conditionals
//! and no loops. A `{{` that does not open a well-formed token is an error,
//! never passed through, so a typo in a template cannot silently reach disk.
//!
//! Pipeline stages resolve through the closed [`Transform`] table and apply
//! left to right, starting from the raw field value:
//!
//! ```text
//! {{ name | pascal | pascal_to_title }}
//!    "basic_math" → "BasicMath" → "Basic Math"
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{
    entities::{descriptor::ValidatedDescriptor, template::TemplateEntry},
    error::DomainError,
    identifier,
};

/// Field name under which the entry id is exposed; also used to label
/// render errors.
pub const TEMPLATE_ID_FIELD: &str = "template_id";

/// Fields computed from the validated descriptor. Metadata cannot set them.
pub const DERIVED_FIELDS: [&str; 9] = [
    "name",
    "name_pascal",
    "name_title",
    "category",
    "subtype",
    "subtype_snake",
    "plugins_key",
    "declaration_dir",
    TEMPLATE_ID_FIELD,
];

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Field-to-value mapping available to one template entry.
///
/// Ordered (`BTreeMap`) so that debugging output and iteration are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the context for one entry of a validated descriptor.
    ///
    /// # Fields
    ///
    /// | Field | Example |
    /// |-------|---------|
    /// | `name` | `basic_math` |
    /// | `name_pascal` | `BasicMath` |
    /// | `name_title` | `Basic Math` |
    /// | `category` | `tool` |
    /// | `subtype` / `subtype_snake` | `text-embedding` / `text_embedding` |
    /// | `plugins_key` | `tools` |
    /// | `declaration_dir` | `provider` |
    /// | `template_id` | `tool/provider/manifest` |
    /// | `author` | `anonymous` unless given |
    /// | `version` | `0.0.1` unless given |
    /// | `description` | `Basic Math plugin` unless given |
    /// | `repo` | empty unless given |
    /// | `created_at` | empty unless given |
    ///
    /// Descriptor metadata may override the metadata defaults (`author`,
    /// `version`, `description`, `repo`, `created_at`) and add new keys.
    /// The [`DERIVED_FIELDS`] always come from the validated descriptor.
    /// Nothing time- or environment-dependent is added.
    pub fn for_entry(descriptor: &ValidatedDescriptor, entry: &TemplateEntry) -> Self {
        let name = descriptor.name().as_str();
        let name_title = identifier::to_title_case(name);
        let category = descriptor.category();

        let mut ctx = Self::new()
            .with_variable("author", "anonymous")
            .with_variable("version", "0.0.1")
            .with_variable("description", format!("{name_title} plugin"))
            .with_variable("repo", "")
            .with_variable("created_at", "");

        for (key, value) in descriptor.metadata() {
            ctx.insert(key.clone(), value.clone());
        }

        ctx.with_variable("name", name)
            .with_variable("name_pascal", identifier::to_pascal_case(name))
            .with_variable("name_title", name_title)
            .with_variable("category", category.as_str())
            .with_variable("subtype", descriptor.subtype().as_str())
            .with_variable("subtype_snake", descriptor.subtype().snake())
            .with_variable("plugins_key", category.plugins_key())
            .with_variable("declaration_dir", category.declaration_dir())
            .with_variable(TEMPLATE_ID_FIELD, entry.id().as_str())
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    fn label(&self) -> String {
        self.get(TEMPLATE_ID_FIELD).unwrap_or("<inline>").to_string()
    }
}

/// Closed dispatch table of pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Pascal,
    Title,
    PascalToTitle,
    Snake,
    Kebab,
    Upper,
    Lower,
}

impl Transform {
    /// Every accepted stage name and the transform it selects.
    pub const TABLE: [(&'static str, Transform); 11] = [
        ("pascal", Self::Pascal),
        ("snake_to_pascal", Self::Pascal),
        ("SnakeToCamel", Self::Pascal),
        ("title", Self::Title),
        ("snake_to_title", Self::Title),
        ("pascal_to_title", Self::PascalToTitle),
        ("CamelToTitle", Self::PascalToTitle),
        ("snake", Self::Snake),
        ("kebab", Self::Kebab),
        ("upper", Self::Upper),
        ("lower", Self::Lower),
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(stage, _)| *stage == name)
            .map(|(_, t)| *t)
    }

    pub fn apply(self, input: &str) -> String {
        match self {
            Self::Pascal => identifier::to_pascal_case(input),
            Self::Title => identifier::to_title_case(input),
            Self::PascalToTitle => identifier::to_title_case_from_pascal(input),
            Self::Snake => identifier::to_snake_case(input),
            Self::Kebab => identifier::to_kebab_case(input),
            Self::Upper => input.to_ascii_uppercase(),
            Self::Lower => input.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pascal => "pascal",
            Self::Title => "title",
            Self::PascalToTitle => "pascal_to_title",
            Self::Snake => "snake",
            Self::Kebab => "kebab",
            Self::Upper => "upper",
            Self::Lower => "lower",
        };
        f.write_str(name)
    }
}

/// Render `body` against `ctx`.
///
/// The whole result is built in memory; the first error in document order
/// is returned and nothing partial escapes.
///
/// # Errors
///
/// - `MalformedToken`: a `{{` that does not open a well-formed token
/// - `MissingField`: a token names a field absent from `ctx`
/// - `UnknownPipelineFunction`: a stage is not in [`Transform::TABLE`]
pub fn render(body: &str, ctx: &RenderContext) -> Result<String, DomainError> {
    let mut out = String::with_capacity(body.len());
    let mut cursor = 0;

    while let Some(rel) = body[cursor..].find(OPEN) {
        let start = cursor + rel;
        out.push_str(&body[cursor..start]);

        let inner_start = start + OPEN.len();
        let inner_len = body[inner_start..]
            .find(CLOSE)
            .ok_or_else(|| malformed(ctx, start, "unterminated token, missing '}}'"))?;
        let inner = &body[inner_start..inner_start + inner_len];

        out.push_str(&eval_token(inner, start, ctx)?);
        cursor = inner_start + inner_len + CLOSE.len();
    }

    out.push_str(&body[cursor..]);
    Ok(out)
}

fn eval_token(inner: &str, offset: usize, ctx: &RenderContext) -> Result<String, DomainError> {
    let mut parts = inner.split('|').map(trim_ws);

    // split always yields at least one item
    let field = parts.next().unwrap_or_default();
    let field = field.strip_prefix('.').unwrap_or(field);
    if field.is_empty() {
        return Err(malformed(ctx, offset, "empty field name"));
    }
    if !is_identifier(field) {
        return Err(malformed(ctx, offset, &format!("invalid field name '{field}'")));
    }

    let mut value = ctx
        .get(field)
        .ok_or_else(|| DomainError::MissingField {
            field: field.to_string(),
            template: ctx.label(),
        })?
        .to_string();

    for stage in parts {
        if stage.is_empty() {
            return Err(malformed(ctx, offset, "empty pipeline stage"));
        }
        if !is_identifier(stage) {
            return Err(malformed(ctx, offset, &format!("invalid stage name '{stage}'")));
        }
        let transform =
            Transform::from_name(stage).ok_or_else(|| DomainError::UnknownPipelineFunction {
                name: stage.to_string(),
                template: ctx.label(),
            })?;
        value = transform.apply(&value);
    }

    Ok(value)
}

fn trim_ws(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '\t')
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn malformed(ctx: &RenderContext, offset: usize, reason: &str) -> DomainError {
    DomainError::MalformedToken {
        offset,
        reason: reason.to_string(),
        template: ctx.label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RenderContext {
        RenderContext::new()
            .with_variable("name", "basic_math")
            .with_variable(TEMPLATE_ID_FIELD, "test/entry")
    }

    #[test]
    fn plain_text_is_copied() {
        assert_eq!(render("no tokens here { }", &ctx()).unwrap(), "no tokens here { }");
        assert_eq!(render("", &ctx()).unwrap(), "");
    }

    #[test]
    fn field_substitution() {
        assert_eq!(render("x={{name}};", &ctx()).unwrap(), "x=basic_math;");
        assert_eq!(render("{{ .name }}", &ctx()).unwrap(), "basic_math");
    }

    #[test]
    fn pipelines_apply_left_to_right() {
        assert_eq!(render("{{ name | pascal }}Tool", &ctx()).unwrap(), "BasicMathTool");
        assert_eq!(
            render("{{ name | pascal | pascal_to_title }}", &ctx()).unwrap(),
            "Basic Math"
        );
        assert_eq!(render("{{name|title|upper}}", &ctx()).unwrap(), "BASIC MATH");
        assert_eq!(render("{{ name | SnakeToCamel }}", &ctx()).unwrap(), "BasicMath");
    }

    #[test]
    fn unknown_stage_is_rejected() {
        let err = render("{{ name | nope }}", &ctx()).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownPipelineFunction {
                name: "nope".into(),
                template: "test/entry".into()
            }
        );
    }

    #[test]
    fn missing_field_is_rejected() {
        let err = render("a {{ missing }}", &ctx()).unwrap_err();
        assert!(matches!(err, DomainError::MissingField { ref field, .. } if field == "missing"));
    }

    #[test]
    fn malformed_tokens_report_offset() {
        for (body, offset) in [
            ("{{ name", 0),
            ("ab{{ }}", 2),
            ("{{ name | }}", 0),
            ("{{ na-me }}", 0),
            ("x {{ name\n}}", 2),
        ] {
            match render(body, &ctx()) {
                Err(DomainError::MalformedToken { offset: got, .. }) => {
                    assert_eq!(got, offset, "{body:?}")
                }
                other => panic!("{body:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn first_error_in_document_order_wins() {
        let err = render("{{ missing }} {{ name | nope }}", &ctx()).unwrap_err();
        assert!(matches!(err, DomainError::MissingField { .. }));
    }

    #[test]
    fn rendering_is_deterministic() {
        let body = "{{ name }}/{{ name | kebab }}/{{ name | pascal }}";
        assert_eq!(render(body, &ctx()).unwrap(), render(body, &ctx()).unwrap());
    }

    #[test]
    fn transform_table_is_closed() {
        assert_eq!(Transform::from_name("pascal"), Some(Transform::Pascal));
        assert_eq!(Transform::from_name("CamelToTitle"), Some(Transform::PascalToTitle));
        assert_eq!(Transform::from_name("Pascal"), None);
        assert_eq!(Transform::Kebab.apply("basic_math"), "basic-math");
    }
}
