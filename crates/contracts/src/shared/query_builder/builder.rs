use super::column_types::ColumnKind;
use super::query_spec::{
    AggregateFunction, Aggregation, BuildOutcome, EmptyReason, IncrementsSpec, LogicalOperator,
    NodeFilter, PeriodSpec, QuerySpec, Timezone, WhereFilter, NOW_TOKEN, WILDCARD,
};
use crate::shared::anylog::schema::ColumnInfo;

/// Renders a [`QuerySpec`] into a `run client ... sql ...` command
///
/// The builder keeps no state between calls: the form calls it again on
/// every change and gets the whole command back.
pub struct QueryStatementBuilder<'a> {
    spec: &'a QuerySpec,
    columns: &'a [ColumnInfo],
}

impl<'a> QueryStatementBuilder<'a> {
    /// `columns` is the metadata of the selected table, used to decide
    /// which aggregations are valid
    pub fn new(spec: &'a QuerySpec, columns: &'a [ColumnInfo]) -> Self {
        Self { spec, columns }
    }

    pub fn build(&self) -> BuildOutcome {
        let database = self.spec.database.trim();
        let table = self.spec.table.trim();
        if database.is_empty() || table.is_empty() {
            return BuildOutcome::Empty {
                reason: EmptyReason::MissingSource,
            };
        }

        let plain_columns = self.plain_columns();
        let aggregations = self.aggregation_expressions();
        let increments = self.active_increments();
        let periods = self.complete_periods();
        let group_by = non_blank(&self.spec.group_by);

        if plain_columns.is_empty() && aggregations.is_empty() {
            return BuildOutcome::Empty {
                reason: EmptyReason::NothingSelected,
            };
        }

        if increments.is_some() && !periods.is_empty() {
            return BuildOutcome::Empty {
                reason: EmptyReason::IncrementsWithPeriods,
            };
        }

        if increments.is_some() && aggregations.is_empty() {
            return BuildOutcome::Empty {
                reason: EmptyReason::IncrementsWithoutAggregation,
            };
        }

        if !plain_columns.is_empty() && !aggregations.is_empty() && group_by.is_empty() {
            return BuildOutcome::GroupByRequired;
        }

        let select_list = self.build_select_list(increments, &plain_columns, &aggregations);

        let mut sql = String::from("SELECT ");
        if self.spec.distinct {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(&select_list);
        sql.push_str(&format!(" FROM {}", table));

        let join_clause = self.build_join_clause();
        if !join_clause.is_empty() {
            sql.push_str(&format!(" {}", join_clause));
        }

        let where_clause = self.build_where_clause(&periods);
        if !where_clause.is_empty() {
            sql.push_str(&format!(" WHERE {}", where_clause));
        }

        if !group_by.is_empty() {
            sql.push_str(&format!(" GROUP BY {}", group_by.join(", ")));
        }

        let order_by_clause = self.build_order_by_clause();
        if !order_by_clause.is_empty() {
            sql.push_str(&format!(" ORDER BY {}", order_by_clause));
        }

        if let Some(limit) = self.spec.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let command = format!("{} \"{}\"", self.build_header(database), sql);
        BuildOutcome::Ready { command }
    }

    /// `run client (<selector>) sql <db> format = ... [options]`
    fn build_header(&self, database: &str) -> String {
        let mut header = format!(
            "run client ({}) sql {} format = {}",
            self.build_node_selector(),
            database,
            self.spec.format.as_str()
        );

        if self.spec.timezone != Timezone::Utc {
            header.push_str(&format!(" timezone = {}", self.spec.timezone.as_str()));
        }

        let include = non_blank(&self.spec.include);
        if !include.is_empty() {
            header.push_str(&format!(" and include=({})", include.join(", ")));
        }

        let extend = non_blank(&self.spec.extend);
        if !extend.is_empty() {
            header.push_str(&format!(" and extend=({})", extend.join(", ")));
        }

        header
    }

    fn build_node_selector(&self) -> String {
        let selector = &self.spec.node_selector;
        if !selector.target_nodes {
            return String::new();
        }

        let conditions: Vec<String> = selector
            .filters
            .iter()
            .filter(|f| is_complete_node_filter(f))
            .map(render_node_filter)
            .collect();

        if conditions.is_empty() {
            "blockchain get operator bring.ip_port".to_string()
        } else {
            format!(
                "blockchain get operator where {} bring.ip_port",
                conditions.join(" and ")
            )
        }
    }

    /// Selected columns, trimmed and deduplicated in selection order
    fn plain_columns(&self) -> Vec<&'a str> {
        let mut columns: Vec<&'a str> = Vec::new();
        for column in &self.spec.columns {
            let column = column.trim();
            if !column.is_empty() && !columns.contains(&column) {
                columns.push(column);
            }
        }
        columns
    }

    /// Expressions for complete aggregations; incomplete ones are skipped
    fn aggregation_expressions(&self) -> Vec<String> {
        self.spec
            .aggregations
            .iter()
            .filter_map(|agg| self.render_aggregation(agg))
            .collect()
    }

    fn render_aggregation(&self, aggregation: &Aggregation) -> Option<String> {
        let function = aggregation.function?;
        let column = aggregation.column.trim();
        if column.is_empty() {
            return None;
        }

        if column == WILDCARD {
            if function != AggregateFunction::Count {
                return None;
            }
        } else {
            let kind = ColumnKind::classify(&self.find_column(column)?.data_type);
            if !kind.accepts(function) {
                return None;
            }
        }

        let alias = match aggregation.alias.as_deref().map(str::trim) {
            Some(alias) if !alias.is_empty() => alias.to_string(),
            _ => default_alias(function, column),
        };

        Some(format!("{}({}) as {}", function.to_sql(), column, alias))
    }

    fn active_increments(&self) -> Option<&'a IncrementsSpec> {
        self.spec
            .increments
            .as_ref()
            .filter(|inc| !inc.date_column.trim().is_empty() && inc.interval > 0)
    }

    fn complete_periods(&self) -> Vec<&'a PeriodSpec> {
        self.spec
            .periods
            .iter()
            .filter(|p| {
                !p.column.trim().is_empty()
                    && !p.start_value.trim().is_empty()
                    && fits_in_quotes(&p.start_value)
                    && p.amount > 0
            })
            .collect()
    }

    fn build_select_list(
        &self,
        increments: Option<&IncrementsSpec>,
        plain_columns: &[&str],
        aggregations: &[String],
    ) -> String {
        let mut items: Vec<String> = Vec::new();

        if let Some(inc) = increments {
            let column = inc.date_column.trim();
            items.push(format!(
                "increments({}, {}, {})",
                inc.unit.as_str(),
                inc.interval,
                column
            ));
            items.push(format!("MIN({}) as window_start", column));
            items.push(format!("MAX({}) as window_end", column));
        }

        items.extend(plain_columns.iter().map(|c| c.to_string()));
        items.extend(aggregations.iter().cloned());

        items.join(", ")
    }

    fn build_join_clause(&self) -> String {
        self.spec
            .joins
            .iter()
            .filter(|j| {
                !j.table.trim().is_empty()
                    && !j.condition.trim().is_empty()
                    && fits_in_quotes(&j.condition)
            })
            .map(|j| {
                format!(
                    "{} JOIN {} ON {}",
                    j.kind.to_sql(),
                    j.table.trim(),
                    j.condition.trim()
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Filters first, then periods; every element but the first is
    /// prefixed by its own logical operator
    fn build_where_clause(&self, periods: &[&PeriodSpec]) -> String {
        let mut predicates: Vec<(LogicalOperator, String)> = self
            .spec
            .filters
            .iter()
            .filter(|f| is_complete_filter(f))
            .map(|f| (f.logical_operator, render_filter(f)))
            .collect();

        predicates.extend(
            periods
                .iter()
                .map(|p| (p.logical_operator, render_period(p))),
        );

        let mut clause = String::new();
        for (idx, (logical, predicate)) in predicates.iter().enumerate() {
            if idx > 0 {
                clause.push_str(&format!(" {} ", logical.to_sql()));
            }
            clause.push_str(predicate);
        }
        clause
    }

    fn build_order_by_clause(&self) -> String {
        self.spec
            .order_by
            .iter()
            .filter(|t| !t.column.trim().is_empty())
            .map(|t| format!("{} {}", t.column.trim(), t.direction.to_sql()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Find column metadata by name
    fn find_column(&self, name: &str) -> Option<&'a ColumnInfo> {
        self.columns.iter().find(|c| c.column_name == name)
    }
}

/// Convenience wrapper around [`QueryStatementBuilder`]
pub fn build_query(spec: &QuerySpec, columns: &[ColumnInfo]) -> BuildOutcome {
    QueryStatementBuilder::new(spec, columns).build()
}

fn non_blank(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect()
}

fn default_alias(function: AggregateFunction, column: &str) -> String {
    if column == WILDCARD {
        return format!("{}_all", function.alias_prefix());
    }
    let sanitized: String = column
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_{}", function.alias_prefix(), sanitized)
}

/// The statement travels inside `"..."`, so a value holding a double
/// quote cannot be sent and the element is skipped
fn fits_in_quotes(value: &str) -> bool {
    !value.contains('"')
}

fn is_complete_filter(filter: &WhereFilter) -> bool {
    !filter.column.trim().is_empty()
        && !filter.value.trim().is_empty()
        && fits_in_quotes(&filter.value)
}

fn is_complete_node_filter(filter: &NodeFilter) -> bool {
    let key = filter.key.trim();
    !key.is_empty()
        && !key.contains(|c: char| c == '"' || c == '(' || c == ')' || c.is_whitespace())
        && fits_in_quotes(&filter.value)
}

fn render_filter(filter: &WhereFilter) -> String {
    format!(
        "{} {} {}",
        filter.column.trim(),
        filter.operator.to_sql(),
        sql_literal(&filter.value)
    )
}

fn render_period(period: &PeriodSpec) -> String {
    format!(
        "period({}, {}, {}, {})",
        period.time_scale.as_str(),
        period.amount,
        sql_literal(&period.start_value),
        period.column.trim()
    )
}

/// Single-quoted literal, except for the `NOW()` token
fn sql_literal(value: &str) -> String {
    if value == NOW_TOKEN {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "''"))
    }
}

fn render_node_filter(filter: &NodeFilter) -> String {
    let value = filter.value.trim();
    let rendered = if is_bare_value(value) {
        value.to_string()
    } else {
        format!("\"{}\"", value)
    };
    format!("{}{}{}", filter.key.trim(), filter.operator.to_sql(), rendered)
}

/// Plain decimals and booleans go unquoted in operator policy filters
fn is_bare_value(value: &str) -> bool {
    is_plain_decimal(value)
        || value.eq_ignore_ascii_case("true")
        || value.eq_ignore_ascii_case("false")
}

/// `-?digits(.digits)?`
fn is_plain_decimal(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && fraction.map_or(true, all_digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::query_builder::query_spec::*;

    fn columns() -> Vec<ColumnInfo> {
        vec![
            ColumnInfo::new("timestamp", "timestamp without time zone"),
            ColumnInfo::new("value", "float"),
            ColumnInfo::new("status", "varchar"),
            ColumnInfo::new("created_date", "date"),
            ColumnInfo::new("device_name", "char(50)"),
        ]
    }

    fn base_spec() -> QuerySpec {
        QuerySpec::new("opcua_demo", "t11")
    }

    #[test]
    fn test_aggregations_only() {
        let mut spec = base_spec();
        spec.format = OutputFormat::Table;
        spec.aggregations = vec![
            Aggregation::new(AggregateFunction::Min, "timestamp"),
            Aggregation::new(AggregateFunction::Max, "timestamp"),
            Aggregation::new(AggregateFunction::Avg, "value"),
        ];

        let outcome = build_query(&spec, &columns());
        let command = outcome.command();

        assert!(command.starts_with("run client () sql opcua_demo format = table \""));
        assert!(command.contains(
            "SELECT MIN(timestamp) as min_timestamp, MAX(timestamp) as max_timestamp, AVG(value) as avg_value FROM t11"
        ));
        assert!(command.ends_with('"'));
    }

    #[test]
    fn test_where_clause_with_now_token() {
        let mut spec = base_spec();
        spec.columns = vec!["status".into(), "created_date".into()];
        spec.filters = vec![
            WhereFilter::new("status", ComparisonOp::Eq, "active"),
            WhereFilter::new("created_date", ComparisonOp::Gt, "NOW()"),
        ];

        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.contains("WHERE status = 'active' AND created_date > NOW()"));
    }

    #[test]
    fn test_count_wildcard_alias() {
        let mut spec = base_spec();
        spec.aggregations = vec![Aggregation::new(AggregateFunction::Count, "*")];

        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.contains("SELECT COUNT(*) as count_all FROM t11"));
    }

    #[test]
    fn test_empty_selection_gives_empty_output() {
        let spec = base_spec();
        let outcome = build_query(&spec, &columns());
        assert_eq!(
            outcome,
            BuildOutcome::Empty {
                reason: EmptyReason::NothingSelected
            }
        );
        assert_eq!(outcome.command(), "");
        assert!(!outcome.needs_group_by());
    }

    #[test]
    fn test_missing_source() {
        let mut spec = QuerySpec::new("", "t11");
        spec.columns = vec!["value".into()];
        assert_eq!(
            build_query(&spec, &columns()),
            BuildOutcome::Empty {
                reason: EmptyReason::MissingSource
            }
        );
    }

    #[test]
    fn test_invalid_aggregations_are_skipped() {
        let mut spec = base_spec();
        spec.aggregations = vec![
            // AVG on a date column
            Aggregation::new(AggregateFunction::Avg, "timestamp"),
            // SUM on text
            Aggregation::new(AggregateFunction::Sum, "status"),
            // wildcard outside COUNT
            Aggregation::new(AggregateFunction::Max, "*"),
            // unknown column
            Aggregation::new(AggregateFunction::Sum, "missing"),
            // no function yet
            Aggregation {
                function: None,
                column: "value".into(),
                alias: None,
            },
        ];

        assert_eq!(build_query(&spec, &columns()).command(), "");

        spec.aggregations
            .push(Aggregation::new(AggregateFunction::Sum, "value").with_alias("total"));
        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.contains("SELECT SUM(value) as total FROM t11"));
    }

    #[test]
    fn test_increments_with_periods_is_empty() {
        let mut spec = base_spec();
        spec.aggregations = vec![Aggregation::new(AggregateFunction::Avg, "value")];
        spec.increments = Some(IncrementsSpec::new(TimeUnit::Minute, 10, "timestamp"));
        spec.periods = vec![PeriodSpec::new(TimeUnit::Hour, 1, "NOW()", "timestamp")];

        assert_eq!(
            build_query(&spec, &columns()),
            BuildOutcome::Empty {
                reason: EmptyReason::IncrementsWithPeriods
            }
        );
    }

    #[test]
    fn test_incomplete_period_does_not_conflict_with_increments() {
        let mut spec = base_spec();
        spec.aggregations = vec![Aggregation::new(AggregateFunction::Avg, "value")];
        spec.increments = Some(IncrementsSpec::new(TimeUnit::Minute, 10, "timestamp"));
        spec.periods = vec![PeriodSpec::new(TimeUnit::Hour, 1, "", "timestamp")];

        assert!(build_query(&spec, &columns()).is_ready());
    }

    #[test]
    fn test_increments_without_aggregation_is_empty() {
        let mut spec = base_spec();
        spec.columns = vec!["value".into()];
        spec.increments = Some(IncrementsSpec::new(TimeUnit::Minute, 5, "timestamp"));

        assert_eq!(
            build_query(&spec, &columns()),
            BuildOutcome::Empty {
                reason: EmptyReason::IncrementsWithoutAggregation
            }
        );
    }

    #[test]
    fn test_increments_select_order() {
        let mut spec = base_spec();
        spec.aggregations = vec![Aggregation::new(AggregateFunction::Avg, "value")];
        spec.increments = Some(IncrementsSpec::new(TimeUnit::Minute, 10, "timestamp"));

        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.contains(
            "SELECT increments(minute, 10, timestamp), MIN(timestamp) as window_start, MAX(timestamp) as window_end, AVG(value) as avg_value FROM t11"
        ));
    }

    #[test]
    fn test_mixed_columns_require_group_by() {
        let mut spec = base_spec();
        spec.columns = vec!["device_name".into()];
        spec.aggregations = vec![Aggregation::new(AggregateFunction::Avg, "value")];

        let outcome = build_query(&spec, &columns());
        assert!(outcome.needs_group_by());
        assert_eq!(outcome.command(), "");
        assert!(outcome.advisory().is_some());

        spec.group_by = vec!["device_name".into()];
        let outcome = build_query(&spec, &columns());
        assert!(!outcome.needs_group_by());
        assert!(outcome.command().contains(
            "SELECT device_name, AVG(value) as avg_value FROM t11 GROUP BY device_name"
        ));
    }

    #[test]
    fn test_blank_group_by_entry_does_not_count() {
        let mut spec = base_spec();
        spec.columns = vec!["device_name".into()];
        spec.aggregations = vec![Aggregation::new(AggregateFunction::Count, "*")];
        spec.group_by = vec!["  ".into()];

        assert!(build_query(&spec, &columns()).needs_group_by());
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut spec = base_spec();
        spec.columns = vec!["device_name".into(), "value".into()];
        spec.filters = vec![WhereFilter::new("value", ComparisonOp::GtEq, "10").or()];
        spec.order_by = vec![OrderTerm::desc("value")];
        spec.limit = Some(10);

        let first = build_query(&spec, &columns());
        let second = build_query(&spec, &columns());
        assert_eq!(first, second);
    }

    #[test]
    fn test_full_clause_order() {
        let mut spec = base_spec();
        spec.columns = vec!["device_name".into()];
        spec.aggregations = vec![Aggregation::new(AggregateFunction::Max, "value")];
        spec.distinct = true;
        spec.timezone = Timezone::Et;
        spec.joins = vec![JoinSpec {
            kind: JoinKind::Left,
            table: "devices".into(),
            condition: "t11.device_name = devices.name".into(),
        }];
        spec.filters = vec![
            WhereFilter::new("status", ComparisonOp::NotEq, "off"),
            WhereFilter::new("value", ComparisonOp::Lt, "100").or(),
        ];
        spec.group_by = vec!["device_name".into()];
        spec.order_by = vec![OrderTerm::asc("device_name")];
        spec.limit = Some(50);

        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert_eq!(
            command,
            "run client () sql opcua_demo format = json timezone = et \"SELECT DISTINCT device_name, MAX(value) as max_value FROM t11 LEFT JOIN devices ON t11.device_name = devices.name WHERE status != 'off' OR value < '100' GROUP BY device_name ORDER BY device_name ASC LIMIT 50\""
        );
    }

    #[test]
    fn test_periods_join_after_filters() {
        let mut spec = base_spec();
        spec.columns = vec!["value".into()];
        spec.filters = vec![WhereFilter::new("status", ComparisonOp::Eq, "active")];
        let mut period = PeriodSpec::new(TimeUnit::Day, 1, "NOW()", "timestamp");
        period.logical_operator = LogicalOperator::Or;
        spec.periods = vec![
            period,
            PeriodSpec::new(TimeUnit::Hour, 2, "2024-01-01 00:00:00", "timestamp"),
        ];

        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.contains(
            "WHERE status = 'active' OR period(day, 1, NOW(), timestamp) AND period(hour, 2, '2024-01-01 00:00:00', timestamp)"
        ));
    }

    #[test]
    fn test_quotes_are_escaped() {
        let mut spec = base_spec();
        spec.columns = vec!["status".into()];
        spec.filters = vec![WhereFilter::new("status", ComparisonOp::Eq, "o'brien")];

        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.contains("WHERE status = 'o''brien'"));
    }

    #[test]
    fn test_now_token_is_exact_match() {
        let mut spec = base_spec();
        spec.columns = vec!["status".into()];
        spec.filters = vec![WhereFilter::new("created_date", ComparisonOp::Lt, "now()")];

        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.contains("created_date < 'now()'"));
    }

    #[test]
    fn test_node_selector_rendering() {
        let mut spec = base_spec();
        spec.columns = vec!["value".into()];
        spec.node_selector.target_nodes = true;

        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.starts_with("run client (blockchain get operator bring.ip_port) sql opcua_demo"));

        spec.node_selector.filters = vec![
            NodeFilter::new("company", ComparisonOp::Eq, "Acme Inc"),
            NodeFilter::new("port", ComparisonOp::Eq, "32148"),
            NodeFilter::new("main", ComparisonOp::Eq, "true"),
        ];
        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.starts_with(
            "run client (blockchain get operator where company=\"Acme Inc\" and port=32148 and main=true bring.ip_port) sql opcua_demo"
        ));
    }

    #[test]
    fn test_include_and_extend_options() {
        let mut spec = base_spec();
        spec.columns = vec!["value".into()];
        spec.include = vec!["opcua_demo.t12".into()];
        spec.extend = vec!["+node_name".into(), "@ip".into(), " ".into()];

        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.starts_with(
            "run client () sql opcua_demo format = json and include=(opcua_demo.t12) and extend=(+node_name, @ip) \"SELECT value FROM t11\""
        ));
    }

    #[test]
    fn test_duplicate_and_blank_columns_are_dropped() {
        let mut spec = base_spec();
        spec.columns = vec!["value".into(), "".into(), "value".into(), "status".into()];

        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.contains("\"SELECT value, status FROM t11\""));
    }

    #[test]
    fn test_parentheses_in_values_stay_inside_literals() {
        let mut spec = base_spec();
        spec.columns = vec!["status".into()];
        spec.filters = vec![
            WhereFilter::new("status", ComparisonOp::Eq, "on (manual)"),
            WhereFilter::new("device_name", ComparisonOp::NotEq, "pump)"),
        ];
        spec.node_selector = NodeSelector {
            target_nodes: true,
            filters: vec![NodeFilter::new("name", ComparisonOp::Eq, "op(1")],
        };

        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert_eq!(
            command,
            "run client (blockchain get operator where name=\"op(1\" bring.ip_port) sql opcua_demo format = json \"SELECT status FROM t11 WHERE status = 'on (manual)' AND device_name != 'pump)'\""
        );
    }

    #[test]
    fn test_values_with_double_quotes_are_skipped() {
        let mut spec = base_spec();
        spec.columns = vec!["status".into()];
        spec.filters = vec![
            WhereFilter::new("status", ComparisonOp::Eq, "say \"hi\""),
            WhereFilter::new("value", ComparisonOp::Gt, "1"),
        ];
        spec.periods = vec![PeriodSpec::new(TimeUnit::Day, 1, "2024\"01", "timestamp")];
        spec.node_selector = NodeSelector {
            target_nodes: true,
            filters: vec![
                NodeFilter::new("company", ComparisonOp::Eq, "Acme \"EU\""),
                NodeFilter::new("name (x)", ComparisonOp::Eq, "op1"),
            ],
        };

        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert_eq!(
            command,
            "run client (blockchain get operator bring.ip_port) sql opcua_demo format = json \"SELECT status FROM t11 WHERE value > '1'\""
        );
        assert_eq!(command.matches('"').count(), 2);
    }

    #[test]
    fn test_blank_or_zero_increments_count_as_absent() {
        let mut spec = base_spec();
        spec.aggregations = vec![Aggregation::new(AggregateFunction::Avg, "value")];

        spec.increments = Some(IncrementsSpec::new(TimeUnit::Minute, 10, "  "));
        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.contains("\"SELECT AVG(value) as avg_value FROM t11\""));

        spec.increments = Some(IncrementsSpec::new(TimeUnit::Minute, 0, "timestamp"));
        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.contains("\"SELECT AVG(value) as avg_value FROM t11\""));

        // absent increments do not conflict with periods either
        spec.periods = vec![PeriodSpec::new(TimeUnit::Hour, 1, "NOW()", "timestamp")];
        assert!(build_query(&spec, &columns()).is_ready());
    }

    #[test]
    fn test_limit_zero_is_rendered() {
        let mut spec = base_spec();
        spec.columns = vec!["value".into()];
        spec.limit = Some(0);

        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.ends_with("FROM t11 LIMIT 0\""));

        spec.limit = None;
        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.ends_with("FROM t11\""));
    }

    #[test]
    fn test_only_plain_decimals_are_bare() {
        for bare in ["42", "-7", "3.25", "TRUE", "false"] {
            assert!(is_bare_value(bare), "{bare}");
        }
        for quoted in ["inf", "-inf", "NaN", "infinity", "1e5", "1.", ".5", "+3", "0x10", ""] {
            assert!(!is_bare_value(quoted), "{quoted}");
        }

        let mut spec = base_spec();
        spec.columns = vec!["value".into()];
        spec.node_selector = NodeSelector {
            target_nodes: true,
            filters: vec![NodeFilter::new("name", ComparisonOp::Eq, "nan")],
        };
        let command = build_query(&spec, &columns()).into_command().unwrap();
        assert!(command.contains("where name=\"nan\" bring.ip_port"));
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(BuildOutcome::GroupByRequired).unwrap();
        assert_eq!(json["status"], "group_by_required");

        let json = serde_json::to_value(BuildOutcome::Empty {
            reason: EmptyReason::NothingSelected,
        })
        .unwrap();
        assert_eq!(json["status"], "empty");
        assert_eq!(json["reason"], "nothing_selected");
    }
}
