/// A named, canned query against the combined view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Report {
    pub(crate) label: &'static str,
    pub(crate) sql: &'static str,
}

const REPORTS: &[Report] = &[
    Report {
        label: "Total Spending by Category",
        sql: "SELECT Category, SUM(Amount_Paid) AS Total_Spending FROM expenses GROUP BY Category",
    },
    Report {
        label: "Monthly Spending Trend",
        sql: "SELECT Month, SUM(Amount_Paid) AS Total_Spending FROM expenses GROUP BY Month",
    },
    Report {
        label: "Total Cashback Earned",
        sql: "SELECT SUM(Cashback) AS Total_Cashback FROM expenses",
    },
    Report {
        label: "Payment Mode Distribution",
        sql: "SELECT Payment_Mode, COUNT(*) AS Count FROM expenses GROUP BY Payment_Mode",
    },
    Report {
        label: "Highest Single Expense",
        sql: "SELECT * FROM expenses ORDER BY Amount_Paid DESC LIMIT 1",
    },
    Report {
        label: "Average Cashback by Category",
        sql: "SELECT Category, AVG(Cashback) AS Average_Cashback FROM expenses GROUP BY Category",
    },
];

pub(crate) fn all() -> &'static [Report] {
    REPORTS
}

/// Exact label match.
pub(crate) fn find(label: &str) -> Option<&'static Report> {
    REPORTS.iter().find(|r| r.label == label)
}

/// 1-based position, as listed by [`all`].
pub(crate) fn by_position(n: usize) -> Option<&'static Report> {
    n.checked_sub(1).and_then(|i| REPORTS.get(i))
}

/// Resolve a command-line selector: a position number or a label
/// (case-insensitive).
pub(crate) fn resolve(selector: &str) -> Option<&'static Report> {
    let selector = selector.trim();
    if let Ok(n) = selector.parse::<usize>() {
        return by_position(n);
    }
    find(selector).or_else(|| {
        REPORTS
            .iter()
            .find(|r| r.label.eq_ignore_ascii_case(selector))
    })
}
