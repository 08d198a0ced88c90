//! Sheet titles of the three tables.

/// Default roster sheet title.
pub const DEFAULT_ROSTER_SHEET: &str = "선수DB";
/// Default settings sheet title (holds the secret in `B1`).
pub const DEFAULT_SETTINGS_SHEET: &str = "설정";
/// Default orders sheet title.
pub const DEFAULT_ORDERS_SHEET: &str = "Orders";

/// Which sheet holds which table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    /// Roster table.
    pub roster: String,
    /// Settings table.
    pub settings: String,
    /// Orders table.
    pub orders: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            roster: DEFAULT_ROSTER_SHEET.to_string(),
            settings: DEFAULT_SETTINGS_SHEET.to_string(),
            orders: DEFAULT_ORDERS_SHEET.to_string(),
        }
    }
}

impl SheetLayout {
    /// Every sheet title, in roster / settings / orders order.
    #[must_use]
    pub fn titles(&self) -> [&str; 3] {
        [&self.roster, &self.settings, &self.orders]
    }
}
