use crate::models::MonthName;

/// Name of the read view spanning every month partition.
pub(crate) const VIEW_NAME: &str = "expenses";

/// Partition columns, in storage order.
pub(crate) const COLUMNS: &[(&str, &str)] = &[
    ("Date", "TEXT"),
    ("Category", "TEXT"),
    ("Payment_Mode", "TEXT"),
    ("Description", "TEXT"),
    ("Amount_Paid", "REAL"),
    ("Cashback", "REAL"),
    ("Month", "TEXT"),
];

pub(crate) fn column_names() -> Vec<String> {
    COLUMNS.iter().map(|(name, _)| name.to_string()).collect()
}

pub(crate) fn create_partition_sql(month: MonthName) -> String {
    let columns = COLUMNS
        .iter()
        .map(|(name, ty)| format!("    {name:<12} {ty}"))
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{columns}\n);",
        month.table_name()
    )
}

pub(crate) fn insert_sql(month: MonthName) -> String {
    let placeholders = (1..=COLUMNS.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} VALUES ({placeholders})",
        month.table_name()
    )
}

/// Union of all partitions, January first.
pub(crate) fn combined_select_sql() -> String {
    MonthName::all()
        .iter()
        .map(|m| format!("SELECT * FROM {}", m.table_name()))
        .collect::<Vec<_>>()
        .join(" UNION ALL ")
}

pub(crate) fn create_view_sql() -> String {
    format!(
        "CREATE VIEW IF NOT EXISTS {VIEW_NAME} AS {}",
        combined_select_sql()
    )
}
