//! Shared vocabulary between the UI and the dataset: which metric sizes the
//! bubbles, and which category filter is active.

/// Metric used to size the station markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Tsr,
    Products,
}

impl Metric {
    pub const ALL: [Self; 2] = [Self::Tsr, Self::Products];

    /// Resolves a metric selector value. Anything unrecognized falls back to
    /// TSR, the default metric.
    pub fn resolve(value: &str) -> Self {
        match value {
            "products" => Self::Products,
            _ => Self::Tsr,
        }
    }

    /// Dataset column holding this metric.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Tsr => "TSR",
            Self::Products => "total products",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tsr => "Total subscription reach",
            Self::Products => "Products in use",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Tsr => 0,
            Self::Products => 1,
        }
    }
}

/// Category filter controls. Exactly one is active at any time; `All` is the
/// default and hides nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    CorePublisher,
    ComposerPro,
    Springboard,
}

impl Filter {
    pub const ALL: [Self; 4] = [
        Self::All,
        Self::CorePublisher,
        Self::ComposerPro,
        Self::Springboard,
    ];

    /// Resolves a filter control identifier; unknown identifiers clear the
    /// filter rather than falling through.
    pub fn resolve(ident: &str) -> Self {
        match ident {
            "corepub" => Self::CorePublisher,
            "composer" => Self::ComposerPro,
            "springboard" => Self::Springboard,
            _ => Self::All,
        }
    }

    pub const fn ident(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::CorePublisher => "corepub",
            Self::ComposerPro => "composer",
            Self::Springboard => "springboard",
        }
    }

    /// Dataset column carrying the membership flag, or `None` for `All`.
    pub const fn category_label(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::CorePublisher => Some("Core Publisher"),
            Self::ComposerPro => Some("Composer Pro"),
            Self::Springboard => Some("Springboard Donation Forms"),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All stations",
            Self::CorePublisher => "Core Publisher",
            Self::ComposerPro => "Composer Pro",
            Self::Springboard => "Springboard",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::All),
            1 => Some(Self::CorePublisher),
            2 => Some(Self::ComposerPro),
            3 => Some(Self::Springboard),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }
}
