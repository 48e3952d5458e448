//! Canned response templates.
//!
//! Builds the per-category response table from the static demo records and
//! picks one entry uniformly at random per reply. Template text is fixed at
//! construction; only the greeting varies with the local time of day.

use chrono::{Local, Timelike};
use rand::rngs::StdRng;
use rand::Rng;

use crate::data::{self, CHECKING, CREDIT, INVESTMENT, SAVINGS, TRANSACTIONS, USER};
use crate::types::ResponseCategory;

/// Prefix prepended to a locally classified reply after a remote failure.
const RECOVERY_PREFIX: &str =
    "I experienced a temporary connection issue, but I'm back online now! ";

/// Per-category response templates, built once per engine.
#[derive(Debug)]
pub struct ResponseLibrary {
    greeting: Vec<String>,
    balance: Vec<String>,
    transactions: Vec<String>,
    transfer: Vec<String>,
    help: Vec<String>,
    credit: Vec<String>,
    investment: Vec<String>,
    issue: Vec<String>,
    default: Vec<String>,
}

impl ResponseLibrary {
    pub fn new() -> Self {
        Self {
            greeting: greeting_templates(),
            balance: vec![balance_template()],
            transactions: vec![transactions_template()],
            transfer: vec![transfer_template()],
            help: vec![help_template()],
            credit: vec![credit_template()],
            investment: vec![investment_template()],
            issue: vec![issue_template()],
            default: vec![default_template()],
        }
    }

    /// Pick one template for the category, uniformly at random.
    ///
    /// Categories with a single entry always return that entry.
    pub fn pick(&self, category: ResponseCategory, rng: &mut StdRng) -> String {
        let templates = self.templates(category);
        let index = rng.random_range(0..templates.len());
        templates[index].clone()
    }

    /// Wrap a reply in the connection-recovery notice.
    pub fn recovered(text: &str) -> String {
        format!("{RECOVERY_PREFIX}{text}")
    }

    fn templates(&self, category: ResponseCategory) -> &[String] {
        match category {
            ResponseCategory::Greeting => &self.greeting,
            ResponseCategory::Balance => &self.balance,
            ResponseCategory::Transactions => &self.transactions,
            ResponseCategory::Transfer => &self.transfer,
            ResponseCategory::Help => &self.help,
            ResponseCategory::Credit => &self.credit,
            ResponseCategory::Investment => &self.investment,
            ResponseCategory::Issue => &self.issue,
            ResponseCategory::Default => &self.default,
        }
    }
}

impl Default for ResponseLibrary {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Formatting helpers
// =============================================================================

/// Format a dollar amount with thousands separators and two decimals.
///
/// The sign is dropped; callers decide how to present direction.
pub fn format_usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped}.{frac:02}")
}

/// Coarse time-of-day bucket for the greeting, from the local clock.
pub fn time_of_day() -> &'static str {
    let hour = Local::now().hour();
    if hour < 12 {
        "morning"
    } else if hour < 17 {
        "afternoon"
    } else {
        "evening"
    }
}

// =============================================================================
// Template bodies
// =============================================================================

fn greeting_templates() -> Vec<String> {
    vec![
        format!(
            "Good {}, {}! Welcome back to Teller Banking. I'm your dedicated \
             banking assistant. As a valued customer since {}, I'm here to \
             provide you with personalized banking assistance. How may I help \
             you today?",
            time_of_day(),
            USER.preferred_name,
            data::MEMBER_SINCE_YEAR,
        ),
        format!(
            "Hello {}! I hope you're having a wonderful day. I'm your \
             intelligent banking companion, ready to assist you with all your \
             financial needs. What can I help you accomplish today?",
            USER.preferred_name,
        ),
        format!(
            "Welcome back, {}! It's great to see you again. I'm here to make \
             your banking experience seamless and efficient. Whether you need \
             account information, want to make a transfer, or have questions \
             about our services, I'm at your service.",
            USER.preferred_name,
        ),
    ]
}

fn balance_template() -> String {
    format!(
        "Here's a comprehensive overview of your accounts, {name}:\n\n\
         {checking} ({checking_no})\n\
         Current Balance: ${checking_bal}\n\
         Interest Rate: {checking_rate}% APY\n\n\
         {savings} ({savings_no})\n\
         Current Balance: ${savings_bal}\n\
         Interest Rate: {savings_rate}% APY\n\n\
         {credit} ({credit_no})\n\
         Available Credit: ${credit_avail}\n\
         Credit Limit: ${credit_limit}\n\n\
         {investment} ({investment_no})\n\
         Portfolio Value: ${investment_bal}\n\
         Today's Change: +${day_change} (+{day_change_pct}%)\n\n\
         Is there a specific account you'd like to know more about, or would \
         you like help with any transactions?",
        name = USER.preferred_name,
        checking = CHECKING.display_name,
        checking_no = CHECKING.number,
        checking_bal = format_usd(CHECKING.balance),
        checking_rate = CHECKING.interest_rate,
        savings = SAVINGS.display_name,
        savings_no = SAVINGS.number,
        savings_bal = format_usd(SAVINGS.balance),
        savings_rate = SAVINGS.interest_rate,
        credit = CREDIT.display_name,
        credit_no = CREDIT.number,
        credit_avail = format_usd(CREDIT.available_credit.unwrap_or_default()),
        credit_limit = format_usd(CREDIT.credit_limit.unwrap_or_default()),
        investment = INVESTMENT.display_name,
        investment_no = INVESTMENT.number,
        investment_bal = format_usd(INVESTMENT.balance),
        day_change = format_usd(INVESTMENT.day_change.unwrap_or_default()),
        day_change_pct = INVESTMENT.day_change_percent.unwrap_or_default(),
    )
}

fn transactions_template() -> String {
    let mut lines = Vec::new();
    for tx in TRANSACTIONS.iter().take(5) {
        let direction = if tx.amount > 0.0 { "+" } else { "-" };
        lines.push(format!(
            "{} | {}\n  {}${} | {} | {} account | {}",
            tx.date,
            tx.description,
            direction,
            format_usd(tx.amount),
            tx.category,
            capitalize(tx.account),
            tx.location,
        ));
    }
    format!(
        "Here are your most recent transactions, {}:\n\n{}\n\n\
         Quick actions:\n\
         - View transactions by category\n\
         - Search specific transactions\n\
         - Download statements\n\
         - Set up account alerts\n\n\
         Would you like me to help you with any of these options or show \
         transactions for a specific account?",
        USER.preferred_name,
        lines.join("\n\n"),
    )
}

fn transfer_template() -> String {
    format!(
        "I'd be happy to help you transfer funds, {name}!\n\n\
         Your available accounts:\n\
         - Checking: ${checking} available\n\
         - Savings: ${savings} available\n\
         - Investment: ${investment} available\n\n\
         Transfer options:\n\
         - Between your accounts (instant, no fees)\n\
         - To external accounts (1-3 business days)\n\
         - Wire transfers (same day, fees apply)\n\n\
         To proceed, please specify the account to transfer from, the account \
         or recipient to transfer to, and the amount.\n\n\
         Security note: for your protection, transfers over $2,500 require \
         additional verification.\n\n\
         What type of transfer would you like to make today?",
        name = USER.preferred_name,
        checking = format_usd(CHECKING.balance),
        savings = format_usd(SAVINGS.balance),
        investment = format_usd(INVESTMENT.balance),
    )
}

fn help_template() -> String {
    format!(
        "I'm here to provide comprehensive banking assistance, {}! Here's \
         what I can help you with:\n\n\
         Account management:\n\
         - Check balances and account details\n\
         - View transaction history and statements\n\
         - Account alerts and notifications\n\n\
         Transfers and payments:\n\
         - Internal account transfers\n\
         - External bank transfers\n\
         - Bill payments and scheduling\n\n\
         Credit and lending:\n\
         - Credit card information\n\
         - Payment scheduling\n\n\
         Investments and planning:\n\
         - Portfolio performance\n\
         - Financial goal tracking\n\n\
         Security and support:\n\
         - Fraud monitoring and alerts\n\
         - Card management\n\
         - Account security settings\n\n\
         What would you like assistance with today?",
        USER.preferred_name,
    )
}

fn credit_template() -> String {
    let recent: Vec<String> = TRANSACTIONS
        .iter()
        .filter(|tx| tx.account == "credit")
        .take(3)
        .map(|tx| format!("- {}: ${}", tx.description, format_usd(tx.amount)))
        .collect();
    format!(
        "Here's your credit account information, {name}:\n\n\
         {display} ({number})\n\n\
         Current status:\n\
         - Available Credit: ${avail}\n\
         - Credit Limit: ${limit}\n\
         - Current Balance: ${balance}\n\
         - Interest Rate: {rate}% APR\n\n\
         Recent activity:\n{recent}\n\n\
         Payment options:\n\
         - Quick pay from checking\n\
         - Schedule automatic payments\n\
         - Pay minimum ($35.00) or full balance\n\n\
         Would you like to make a payment or need help with any credit card \
         features?",
        name = USER.preferred_name,
        display = CREDIT.display_name,
        number = CREDIT.number,
        avail = format_usd(CREDIT.available_credit.unwrap_or_default()),
        limit = format_usd(CREDIT.credit_limit.unwrap_or_default()),
        balance = format_usd(CREDIT.balance),
        rate = CREDIT.interest_rate,
        recent = recent.join("\n"),
    )
}

fn investment_template() -> String {
    let recent: Vec<String> = TRANSACTIONS
        .iter()
        .filter(|tx| tx.account == "investment")
        .take(2)
        .map(|tx| format!("- {}: +${}", tx.description, format_usd(tx.amount)))
        .collect();
    format!(
        "Here's your investment portfolio summary, {name}:\n\n\
         {display} ({number})\n\n\
         Portfolio performance:\n\
         - Total Value: ${balance}\n\
         - Today's Change: +${day_change} ({day_change_pct}%)\n\
         - YTD Performance: +8.2%\n\n\
         Recent investment activity:\n{recent}\n\n\
         Investment services:\n\
         - Rebalance portfolio\n\
         - Performance reports\n\
         - Schedule advisor consultation\n\n\
         Would you like detailed performance metrics or help with investment \
         planning?",
        name = USER.preferred_name,
        display = INVESTMENT.display_name,
        number = INVESTMENT.number,
        balance = format_usd(INVESTMENT.balance),
        day_change = format_usd(INVESTMENT.day_change.unwrap_or_default()),
        day_change_pct = INVESTMENT.day_change_percent.unwrap_or_default(),
        recent = recent.join("\n"),
    )
}

fn issue_template() -> String {
    format!(
        "I'm sorry to hear you're experiencing an issue, {}. I'm here to help \
         resolve this quickly and efficiently!\n\n\
         Common issues I can assist with:\n\n\
         Security and access:\n\
         - Login problems or locked accounts\n\
         - Forgotten passwords or PINs\n\
         - Suspicious activity alerts\n\n\
         Card services:\n\
         - Lost or stolen card reporting\n\
         - Card activation or replacement\n\
         - Transaction disputes\n\n\
         Transaction issues:\n\
         - Pending or missing transactions\n\
         - Transfer problems\n\
         - Payment failures\n\n\
         Emergency services available 24/7:\n\
         - Card blocking\n\
         - Fraud reporting\n\n\
         Please describe your specific issue, and I'll provide immediate \
         assistance or connect you with the appropriate specialist.",
        USER.preferred_name,
    )
}

fn default_template() -> String {
    format!(
        "I understand you're asking about our banking services, {}. I want to \
         ensure I provide you with accurate information.\n\n\
         I can immediately help you with:\n\
         - Account balances and transactions\n\
         - Money transfers and payments\n\
         - Credit card and loan information\n\
         - Investment portfolio details\n\
         - General banking inquiries\n\n\
         For specialized assistance, I can connect you with personal banking \
         specialists, investment advisors, loan officers, or technical \
         support.\n\n\
         Could you please rephrase your question or let me know which of \
         these areas I can help you with?",
        USER.preferred_name,
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    // ---- format_usd ----

    #[test]
    fn test_format_usd_grouping() {
        assert_eq!(format_usd(4567.89), "4,567.89");
        assert_eq!(format_usd(12340.50), "12,340.50");
        assert_eq!(format_usd(15000.0), "15,000.00");
        assert_eq!(format_usd(45678.90), "45,678.90");
    }

    #[test]
    fn test_format_usd_small_values() {
        assert_eq!(format_usd(4.95), "4.95");
        assert_eq!(format_usd(0.0), "0.00");
        assert_eq!(format_usd(999.99), "999.99");
    }

    #[test]
    fn test_format_usd_drops_sign() {
        assert_eq!(format_usd(-1245.67), "1,245.67");
    }

    #[test]
    fn test_format_usd_million() {
        assert_eq!(format_usd(1234567.89), "1,234,567.89");
    }

    // ---- time_of_day ----

    #[test]
    fn test_time_of_day_is_known_bucket() {
        assert!(["morning", "afternoon", "evening"].contains(&time_of_day()));
    }

    // ---- library ----

    #[test]
    fn test_single_template_categories_are_stable() {
        let library = ResponseLibrary::new();
        let mut rng = rng();
        let first = library.pick(ResponseCategory::Balance, &mut rng);
        let second = library.pick(ResponseCategory::Balance, &mut rng);
        assert_eq!(first, second);
    }

    #[test]
    fn test_greeting_has_three_variants() {
        let library = ResponseLibrary::new();
        let mut rng = rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            seen.insert(library.pick(ResponseCategory::Greeting, &mut rng));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_pick_is_deterministic_with_fixed_seed() {
        let library = ResponseLibrary::new();
        let a = library.pick(ResponseCategory::Greeting, &mut rng());
        let b = library.pick(ResponseCategory::Greeting, &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_templates_interpolate_demo_data() {
        let library = ResponseLibrary::new();
        let mut rng = rng();
        let balance = library.pick(ResponseCategory::Balance, &mut rng);
        assert!(balance.contains("Sarah"));
        assert!(balance.contains("$4,567.89"));
        assert!(balance.contains("$13,754.33"));

        let credit = library.pick(ResponseCategory::Credit, &mut rng);
        assert!(credit.contains("$15,000.00"));
        assert!(credit.contains("16.99% APR"));

        let investment = library.pick(ResponseCategory::Investment, &mut rng);
        assert!(investment.contains("$45,678.90"));
        assert!(investment.contains("+$234.56"));
    }

    #[test]
    fn test_transactions_template_lists_five() {
        let library = ResponseLibrary::new();
        let text = library.pick(ResponseCategory::Transactions, &mut rng());
        assert!(text.contains("Coffee Bean Downtown"));
        assert!(text.contains("Transfer to Savings"));
        // Only the first five transactions are shown.
        assert!(!text.contains("Credit Card Payment"));
    }

    #[test]
    fn test_every_category_nonempty() {
        let library = ResponseLibrary::new();
        let mut rng = rng();
        for category in [
            ResponseCategory::Greeting,
            ResponseCategory::Balance,
            ResponseCategory::Transactions,
            ResponseCategory::Transfer,
            ResponseCategory::Help,
            ResponseCategory::Credit,
            ResponseCategory::Investment,
            ResponseCategory::Issue,
            ResponseCategory::Default,
        ] {
            assert!(!library.pick(category, &mut rng).is_empty());
        }
    }

    // ---- recovery prefix ----

    #[test]
    fn test_recovered_prefixes_notice() {
        let wrapped = ResponseLibrary::recovered("All set.");
        assert!(wrapped.starts_with("I experienced a temporary connection issue"));
        assert!(wrapped.ends_with("All set."));
    }
}
