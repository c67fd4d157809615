//! Transformation rules per input category.
//!
//! Each rule pairs a path matcher with the steps the bundler runs, in
//! execution order. Component files embed the stylesheet pipelines for
//! their `<style>` blocks.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.(html|xml)$").unwrap());
static STYLESHEET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.css$").unwrap());
static PREPROCESSED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.scss$").unwrap());
static COMPONENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.vue$").unwrap());

/// Kind of input file a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputCategory {
    /// `.html` / `.xml` page markup.
    Markup,
    /// Plain `.css`.
    Stylesheet,
    /// `.scss`.
    PreprocessedStylesheet,
    /// Single-file `.vue` components.
    Component,
}

impl InputCategory {
    pub const ALL: [Self; 4] = [
        Self::Markup,
        Self::Stylesheet,
        Self::PreprocessedStylesheet,
        Self::Component,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            Self::Markup => &*MARKUP,
            Self::Stylesheet => &*STYLESHEET,
            Self::PreprocessedStylesheet => &*PREPROCESSED,
            Self::Component => &*COMPONENT,
        }
    }
}

/// Path matcher, serialized as its pattern.
#[derive(Clone)]
pub struct Matcher(&'static Regex);

impl Matcher {
    pub fn for_category(category: InputCategory) -> Self {
        Self(category.regex())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Match against the path's string form. Non UTF-8 paths never match.
    pub fn matches(&self, path: &Path) -> bool {
        path.to_str().is_some_and(|s| self.0.is_match(s))
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matcher").field(&self.as_str()).finish()
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Matcher {}

impl Serialize for Matcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single processing step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum TransformStep {
    /// Expand XML namespaces in page markup into module requires.
    ResolveMarkupNamespaces,
    /// Compile the preprocessor dialect to CSS, following its imports.
    ResolvePreprocessorImports,
    /// Parse CSS into a module. Never minifies or rewrites `url()`.
    LowerCss {
        minimize: bool,
        rewrite_urls: bool,
        include_paths: Vec<PathBuf>,
    },
    /// Pull the resulting CSS out of the script bundle.
    ExtractText,
    /// Compile a single-file component; `<style>` blocks go through the
    /// embedded pipelines keyed by their `lang`.
    CompileComponent { styles: Vec<StylePipeline> },
}

impl TransformStep {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ResolveMarkupNamespaces => "resolve-markup-namespaces",
            Self::ResolvePreprocessorImports => "resolve-preprocessor-imports",
            Self::LowerCss { .. } => "lower-css",
            Self::ExtractText => "extract-text",
            Self::CompileComponent { .. } => "compile-component",
        }
    }
}

/// Pipeline applied to a component's `<style lang="...">` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylePipeline {
    pub lang: String,
    pub steps: Vec<TransformStep>,
}

/// Matcher plus ordered pipeline for one input category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformRule {
    pub category: InputCategory,
    pub matcher: Matcher,
    pub pipeline: Vec<TransformStep>,
}

impl TransformRule {
    fn new(category: InputCategory, pipeline: Vec<TransformStep>) -> Self {
        Self {
            category,
            matcher: Matcher::for_category(category),
            pipeline,
        }
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.pipeline.iter().map(TransformStep::name).collect()
    }
}

/// One rule per input category, in [`InputCategory::ALL`] order.
///
/// `node_modules` is the include path for preprocessor imports.
pub fn transform_rules(node_modules: &Path) -> Vec<TransformRule> {
    let css = css_pipeline();
    let scss = scss_pipeline(node_modules);

    InputCategory::ALL
        .into_iter()
        .map(|category| {
            let pipeline = match category {
                InputCategory::Markup => vec![TransformStep::ResolveMarkupNamespaces],
                InputCategory::Stylesheet => css.clone(),
                InputCategory::PreprocessedStylesheet => scss.clone(),
                InputCategory::Component => vec![TransformStep::CompileComponent {
                    styles: vec![
                        StylePipeline {
                            lang: "css".into(),
                            steps: css.clone(),
                        },
                        StylePipeline {
                            lang: "scss".into(),
                            steps: scss.clone(),
                        },
                    ],
                }],
            };
            TransformRule::new(category, pipeline)
        })
        .collect()
}

fn css_pipeline() -> Vec<TransformStep> {
    vec![
        TransformStep::LowerCss {
            minimize: false,
            rewrite_urls: false,
            include_paths: Vec::new(),
        },
        TransformStep::ExtractText,
    ]
}

fn scss_pipeline(node_modules: &Path) -> Vec<TransformStep> {
    vec![
        TransformStep::ResolvePreprocessorImports,
        TransformStep::LowerCss {
            minimize: false,
            rewrite_urls: false,
            include_paths: vec![node_modules.to_path_buf()],
        },
        TransformStep::ExtractText,
    ]
}
