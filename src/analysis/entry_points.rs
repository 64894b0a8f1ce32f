use crate::config::Config;
use tracing::trace;

/// Why a file counts as an entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// page/layout under the app router
    AppRoute,
    /// route handler under the app router
    ApiRoute,
    /// loading/error/not-found boundaries
    RouteBoundary,
    ConfigFile,
    RootLayout,
    AmbientTypes,
    ContextProvider,
    /// loaded by the AI flow runtime by name
    AiFlow,
    /// matched a user retain pattern
    Retained,
}

impl EntryKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            EntryKind::AppRoute => "app route",
            EntryKind::ApiRoute => "API route",
            EntryKind::RouteBoundary => "route boundary",
            EntryKind::ConfigFile => "config file",
            EntryKind::RootLayout => "root layout",
            EntryKind::AmbientTypes => "ambient types",
            EntryKind::ContextProvider => "context provider",
            EntryKind::AiFlow => "AI flow",
            EntryKind::Retained => "retained",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PathPattern {
    Contains(&'static str),
    EndsWith(&'static str),
    Equals(&'static str),
}

impl PathPattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Contains(s) => path.contains(s),
            PathPattern::EndsWith(s) => path.ends_with(s),
            PathPattern::Equals(s) => path == *s,
        }
    }
}

/// A rule matches when every `all_of` pattern and at least one `any_of`
/// pattern match (an empty `any_of` always passes).
struct EntryRule {
    kind: EntryKind,
    all_of: &'static [PathPattern],
    any_of: &'static [PathPattern],
}

impl EntryRule {
    fn matches(&self, path: &str) -> bool {
        self.all_of.iter().all(|p| p.matches(path))
            && (self.any_of.is_empty() || self.any_of.iter().any(|p| p.matches(path)))
    }
}

use PathPattern::{Contains, EndsWith, Equals};

const ENTRY_RULES: &[EntryRule] = &[
    EntryRule {
        kind: EntryKind::AppRoute,
        all_of: &[Contains("src/app/")],
        any_of: &[EndsWith("page.tsx"), EndsWith("layout.tsx")],
    },
    EntryRule {
        kind: EntryKind::ApiRoute,
        all_of: &[Contains("src/app/"), EndsWith("route.ts")],
        any_of: &[],
    },
    EntryRule {
        kind: EntryKind::RouteBoundary,
        all_of: &[Contains("src/app/")],
        any_of: &[
            EndsWith("loading.tsx"),
            EndsWith("error.tsx"),
            EndsWith("not-found.tsx"),
        ],
    },
    EntryRule {
        kind: EntryKind::ConfigFile,
        all_of: &[],
        any_of: &[
            EndsWith("next.config.js"),
            EndsWith("tailwind.config.ts"),
            EndsWith("tsconfig.json"),
        ],
    },
    EntryRule {
        kind: EntryKind::RootLayout,
        all_of: &[],
        any_of: &[Equals("src/app/layout.tsx"), Equals("src/app/globals.css")],
    },
    EntryRule {
        kind: EntryKind::AmbientTypes,
        all_of: &[EndsWith(".d.ts")],
        any_of: &[Contains("next-env"), Contains("global")],
    },
    EntryRule {
        kind: EntryKind::ContextProvider,
        all_of: &[Contains("context/"), EndsWith("Context.tsx")],
        any_of: &[],
    },
    EntryRule {
        kind: EntryKind::AiFlow,
        all_of: &[],
        any_of: &[
            Contains("src/ai/flows/"),
            Contains("src/ai/dev.ts"),
            Contains("src/ai/genkit.ts"),
        ],
    },
];

/// Recognizes files loaded outside the static import graph
/// (framework routing, build config, runtime registration).
pub struct EntryPointClassifier {
    config: Config,
}

impl EntryPointClassifier {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Classifier with the built-in table only
    pub fn builtin() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn classify(&self, path: &str) -> Option<EntryKind> {
        let kind = ENTRY_RULES
            .iter()
            .find(|rule| rule.matches(path))
            .map(|rule| rule.kind)
            .or_else(|| {
                self.config
                    .should_retain(path)
                    .then_some(EntryKind::Retained)
            });

        if let Some(kind) = kind {
            trace!("Entry point ({}): {}", kind.display_name(), path);
        }
        kind
    }

    pub fn is_entry_point(&self, path: &str) -> bool {
        self.classify(path).is_some()
    }
}
