use capsync_core::Account;

pub struct TableFormatter {
    id_width: usize,
    name_width: usize,
    display_name_width: usize,
    color_width: usize,
    api_width: usize,
    editing_width: usize,
    cached_width: usize,
}

impl TableFormatter {
    pub fn new(accounts: &[Account]) -> Self {
        let name_width = accounts
            .iter()
            .map(|a| a.account_name.chars().count())
            .max()
            .unwrap_or(16)
            .clamp(7, 40); // Between "Account" header min and reasonable terminal width max

        Self {
            id_width: 4,
            name_width,
            display_name_width: 20,
            color_width: 7,
            api_width: 12,
            editing_width: 7,
            cached_width: 6,
        }
    }

    pub fn print_table(&self, accounts: &[Account]) {
        self.print_header();
        for account in accounts {
            self.print_row(account);
        }
        self.print_footer();
    }

    fn print_header(&self) {
        println!("{}", self.border('┌', '┬', '┐'));
        println!("{}", self.header_row());
        println!("{}", self.border('├', '┼', '┤'));
    }

    fn print_footer(&self) {
        println!("{}", self.border('└', '┴', '┘'));
    }

    fn print_row(&self, account: &Account) {
        let editing = if account.direct_editing_available {
            "yes"
        } else {
            "no"
        };
        let cached = if account.etag().is_some() { "yes" } else { "no" };

        println!(
            "{}",
            self.row([
                account.id.to_string().as_str(),
                &account.account_name,
                &account.display_name,
                &account.brand_color,
                &account.api_version,
                editing,
                cached,
            ])
        );
    }

    fn header_row(&self) -> String {
        self.row([
            "ID",
            "Account",
            "Display Name",
            "Color",
            "API Version",
            "Editing",
            "Cached",
        ])
    }

    fn widths(&self) -> [usize; 7] {
        [
            self.id_width,
            self.name_width,
            self.display_name_width,
            self.color_width,
            self.api_width,
            self.editing_width,
            self.cached_width,
        ]
    }

    fn row(&self, cells: [&str; 7]) -> String {
        let cells: Vec<String> = cells
            .iter()
            .zip(self.widths())
            .map(|(cell, width)| truncate(cell, width))
            .collect();
        format!("│ {} │", cells.join(" │ "))
    }

    fn border(&self, left: char, middle: char, right: char) -> String {
        let segments: Vec<String> = self
            .widths()
            .iter()
            .map(|width| "─".repeat(width + 2))
            .collect();
        format!("{}{}{}", left, segments.join(middle.to_string().as_str()), right)
    }
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) to safely handle UTF-8 strings.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
