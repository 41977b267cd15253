use serde::{Deserialize, Serialize};

/// Column token accepted by `COUNT(*)`
pub const WILDCARD: &str = "*";

/// Literal passed through to the node unquoted
pub const NOW_TOKEN: &str = "NOW()";

/// Output format requested from the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
        }
    }
}

/// Timezone applied by the node to date/time values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timezone {
    #[default]
    Utc,
    Local,
    Pt,
    Mt,
    Ct,
    Et,
}

impl Timezone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timezone::Utc => "utc",
            Timezone::Local => "local",
            Timezone::Pt => "pt",
            Timezone::Mt => "mt",
            Timezone::Ct => "ct",
            Timezone::Et => "et",
        }
    }
}

/// Aggregate function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregateFunction {
    /// Count of rows
    Count,
    /// Sum of values
    Sum,
    /// Average value
    Avg,
    /// Minimum value
    Min,
    /// Maximum value
    Max,
}

impl AggregateFunction {
    pub const ALL: [AggregateFunction; 5] = [
        AggregateFunction::Count,
        AggregateFunction::Sum,
        AggregateFunction::Avg,
        AggregateFunction::Min,
        AggregateFunction::Max,
    ];

    /// Get SQL function name
    pub fn to_sql(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
        }
    }

    /// Prefix used for generated aliases (`avg_value`)
    pub fn alias_prefix(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "count",
            AggregateFunction::Sum => "sum",
            AggregateFunction::Avg => "avg",
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
        }
    }
}

/// One aggregation in the select list
///
/// `function` is optional because the form lets a row exist before a
/// function is picked; such rows are skipped at build time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Aggregation {
    #[serde(default)]
    pub function: Option<AggregateFunction>,
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub alias: Option<String>,
}

impl Aggregation {
    pub fn new(function: AggregateFunction, column: impl Into<String>) -> Self {
        Self {
            function: Some(function),
            column: column.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComparisonOp {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtEq,
}

impl ComparisonOp {
    pub fn to_sql(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::NotEq => "!=",
            ComparisonOp::Gt => ">",
            ComparisonOp::GtEq => ">=",
            ComparisonOp::Lt => "<",
            ComparisonOp::LtEq => "<=",
        }
    }
}

/// Connective placed before a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl LogicalOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}

/// `<column> <operator> <value>` predicate
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WhereFilter {
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub operator: ComparisonOp,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub logical_operator: LogicalOperator,
}

impl WhereFilter {
    pub fn new(column: impl Into<String>, operator: ComparisonOp, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
            logical_operator: LogicalOperator::And,
        }
    }

    pub fn or(mut self) -> Self {
        self.logical_operator = LogicalOperator::Or;
        self
    }
}

/// Time unit used by `increments` and `period`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    #[default]
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        }
    }
}

/// Time bucketing of a date/time column into fixed-width windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementsSpec {
    #[serde(default)]
    pub unit: TimeUnit,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default)]
    pub date_column: String,
}

fn default_interval() -> u32 {
    1
}

impl IncrementsSpec {
    pub fn new(unit: TimeUnit, interval: u32, date_column: impl Into<String>) -> Self {
        Self {
            unit,
            interval,
            date_column: date_column.into(),
        }
    }
}

/// Time-window predicate anchored at `start_value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSpec {
    #[serde(default)]
    pub time_scale: TimeUnit,
    #[serde(default = "default_interval")]
    pub amount: u32,
    #[serde(default)]
    pub start_value: String,
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub logical_operator: LogicalOperator,
}

impl PeriodSpec {
    pub fn new(
        time_scale: TimeUnit,
        amount: u32,
        start_value: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            time_scale,
            amount,
            start_value: start_value.into(),
            column: column.into(),
            logical_operator: LogicalOperator::And,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
            JoinKind::Full => "FULL",
        }
    }
}

/// `<kind> JOIN <table> ON <condition>`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JoinSpec {
    #[serde(default)]
    pub kind: JoinKind,
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub condition: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderTerm {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl OrderTerm {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Operator policy filter, rendered as `<key><op><value>`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeFilter {
    pub key: String,
    #[serde(default)]
    pub operator: ComparisonOp,
    pub value: String,
}

impl NodeFilter {
    pub fn new(key: impl Into<String>, operator: ComparisonOp, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Which nodes the query is dispatched to
///
/// With `target_nodes` off the query goes to the whole network (`()`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeSelector {
    #[serde(default)]
    pub target_nodes: bool,
    #[serde(default)]
    pub filters: Vec<NodeFilter>,
}

/// Everything the statement builder needs, collected from the form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    pub database: String,
    pub table: String,
    pub columns: Vec<String>,
    pub aggregations: Vec<Aggregation>,
    pub filters: Vec<WhereFilter>,
    pub increments: Option<IncrementsSpec>,
    pub periods: Vec<PeriodSpec>,
    pub joins: Vec<JoinSpec>,
    pub group_by: Vec<String>,
    pub order_by: Vec<OrderTerm>,
    pub limit: Option<u64>,
    pub format: OutputFormat,
    pub timezone: Timezone,
    pub distinct: bool,
    pub include: Vec<String>,
    pub extend: Vec<String>,
    pub node_selector: NodeSelector,
}

impl QuerySpec {
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
            ..Default::default()
        }
    }
}

/// Why a build produced no command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// Database or table not chosen
    MissingSource,
    /// No column and no complete aggregation
    NothingSelected,
    /// Increments combined with period filters
    IncrementsWithPeriods,
    /// Increments without any complete aggregation
    IncrementsWithoutAggregation,
}

impl EmptyReason {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyReason::MissingSource => "Select a database and a table",
            EmptyReason::NothingSelected => "Select at least one column or aggregation",
            EmptyReason::IncrementsWithPeriods => {
                "Increments and period filters cannot be used together"
            }
            EmptyReason::IncrementsWithoutAggregation => {
                "Increments requires at least one aggregation"
            }
        }
    }
}

/// Result of a statement build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BuildOutcome {
    Ready { command: String },
    Empty { reason: EmptyReason },
    /// Plain columns mixed with aggregations and no GROUP BY
    GroupByRequired,
}

impl BuildOutcome {
    /// The command, or an empty string when nothing could be built
    pub fn command(&self) -> &str {
        match self {
            BuildOutcome::Ready { command } => command,
            _ => "",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, BuildOutcome::Ready { .. })
    }

    pub fn needs_group_by(&self) -> bool {
        matches!(self, BuildOutcome::GroupByRequired)
    }

    pub fn into_command(self) -> Option<String> {
        match self {
            BuildOutcome::Ready { command } => Some(command),
            _ => None,
        }
    }

    /// Human-readable explanation for non-ready outcomes
    pub fn advisory(&self) -> Option<&'static str> {
        match self {
            BuildOutcome::Ready { .. } => None,
            BuildOutcome::Empty { reason } => Some(reason.message()),
            BuildOutcome::GroupByRequired => Some(
                "GROUP BY is required when mixing aggregated and non-aggregated columns",
            ),
        }
    }
}
