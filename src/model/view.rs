use super::task::Status;

/// Status tab shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Open,
    InProgress,
    Closed,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Open, Tab::InProgress, Tab::Closed];

    /// The status whose tasks this tab lists
    pub fn status(self) -> Status {
        match self {
            Tab::Open => Status::Open,
            Tab::InProgress => Status::InProgress,
            Tab::Closed => Status::Closed,
        }
    }

    /// Tab for a known status (None for unknown statuses)
    pub fn from_status(status: &Status) -> Option<Tab> {
        match status {
            Status::Open => Some(Tab::Open),
            Status::InProgress => Some(Tab::InProgress),
            Status::Closed => Some(Tab::Closed),
            Status::Other(_) => None,
        }
    }

    pub fn parse(s: &str) -> Option<Tab> {
        Status::parse(s).as_ref().and_then(Tab::from_status)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Open => "OPEN",
            Tab::InProgress => "IN_PROGRESS",
            Tab::Closed => "CLOSED",
        }
    }

    /// Title shown in the tab bar
    pub fn title(self) -> &'static str {
        match self {
            Tab::Open => "Open",
            Tab::InProgress => "In Progress",
            Tab::Closed => "Completed",
        }
    }

    pub fn next(self) -> Tab {
        match self {
            Tab::Open => Tab::InProgress,
            Tab::InProgress => Tab::Closed,
            Tab::Closed => Tab::Open,
        }
    }

    pub fn prev(self) -> Tab {
        match self {
            Tab::Open => Tab::Closed,
            Tab::InProgress => Tab::Open,
            Tab::Closed => Tab::InProgress,
        }
    }
}

/// Field the task list is sorted by
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    Priority,
    /// Any other field name. Sorting by it leaves the order untouched.
    Other(String),
}

impl SortField {
    pub fn as_str(&self) -> &str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Priority => "priority",
            SortField::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> SortField {
        match s {
            "created_at" => SortField::CreatedAt,
            "priority" => SortField::Priority,
            other => SortField::Other(other.to_string()),
        }
    }

    /// Toggle between the two sortable columns
    pub fn toggle(&self) -> SortField {
        match self {
            SortField::CreatedAt => SortField::Priority,
            SortField::Priority | SortField::Other(_) => SortField::CreatedAt,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SortField::CreatedAt => "created",
            SortField::Priority => "priority",
            SortField::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Persisted form: 1 ascending, -1 descending
    pub fn as_sign(self) -> i8 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }

    pub fn from_sign(sign: i8) -> Option<SortOrder> {
        match sign {
            1 => Some(SortOrder::Ascending),
            -1 => Some(SortOrder::Descending),
            _ => None,
        }
    }

    pub fn flip(self) -> SortOrder {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Ascending => "\u{2191}",
            SortOrder::Descending => "\u{2193}",
        }
    }
}

/// User-controlled view parameters: tab, search, sorting
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub tab: Tab,
    pub search_query: String,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl ViewState {
    /// Reset sorting to the default (created_at ascending)
    pub fn reset_sorting(&mut self) {
        self.sort_field = SortField::CreatedAt;
        self.sort_order = SortOrder::Ascending;
    }
}
