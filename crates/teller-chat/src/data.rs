//! Static demo banking records.
//!
//! Stand-in for the bank's data services. Everything here is read-only and
//! compiled in; the rest of the crate only interpolates these values into
//! response templates.

/// The demo customer.
#[derive(Debug, Clone, Copy)]
pub struct UserProfile {
    pub name: &'static str,
    pub preferred_name: &'static str,
    pub member_since: &'static str,
    pub customer_id: &'static str,
    pub security_level: &'static str,
}

/// One account as the data services would report it.
///
/// Credit-specific and investment-specific fields are `None` for the other
/// account kinds.
#[derive(Debug, Clone, Copy)]
pub struct AccountRecord {
    pub id: &'static str,
    pub display_name: &'static str,
    pub number: &'static str,
    /// Signed balance in dollars; negative for carried credit debt.
    pub balance: f64,
    pub interest_rate: f64,
    pub credit_limit: Option<f64>,
    pub available_credit: Option<f64>,
    pub day_change: Option<f64>,
    pub day_change_percent: Option<f64>,
}

/// One posted transaction.
#[derive(Debug, Clone, Copy)]
pub struct Transaction {
    pub date: &'static str,
    pub description: &'static str,
    /// Signed amount in dollars; negative for debits.
    pub amount: f64,
    pub category: &'static str,
    pub account: &'static str,
    pub location: &'static str,
}

pub const USER: UserProfile = UserProfile {
    name: "Sarah Johnson",
    preferred_name: "Sarah",
    member_since: "2019-03-15",
    customer_id: "Cust789123",
    security_level: "enhanced",
};

/// Year extracted from [`UserProfile::member_since`], used in the greeting.
pub const MEMBER_SINCE_YEAR: &str = "2019";

pub const CHECKING: AccountRecord = AccountRecord {
    id: "checking",
    display_name: "Premium Checking Account",
    number: "****7234",
    balance: 4567.89,
    interest_rate: 0.25,
    credit_limit: None,
    available_credit: None,
    day_change: None,
    day_change_percent: None,
};

pub const SAVINGS: AccountRecord = AccountRecord {
    id: "savings",
    display_name: "High-Yield Savings Account",
    number: "****8901",
    balance: 12340.50,
    interest_rate: 3.25,
    credit_limit: None,
    available_credit: None,
    day_change: None,
    day_change_percent: None,
};

pub const CREDIT: AccountRecord = AccountRecord {
    id: "credit",
    display_name: "Platinum Credit Card",
    number: "****5678",
    balance: -1245.67,
    interest_rate: 16.99,
    credit_limit: Some(15000.00),
    available_credit: Some(13754.33),
    day_change: None,
    day_change_percent: None,
};

pub const INVESTMENT: AccountRecord = AccountRecord {
    id: "investment",
    display_name: "Investment Portfolio",
    number: "****3456",
    balance: 45678.90,
    interest_rate: 0.0,
    credit_limit: None,
    available_credit: None,
    day_change: Some(234.56),
    day_change_percent: Some(0.52),
};

pub const ACCOUNTS: [AccountRecord; 4] = [CHECKING, SAVINGS, CREDIT, INVESTMENT];

pub const TRANSACTIONS: [Transaction; 7] = [
    Transaction {
        date: "2024-01-15",
        description: "Coffee Bean Downtown",
        amount: -4.95,
        category: "Food & Dining",
        account: "checking",
        location: "Detroit, MI",
    },
    Transaction {
        date: "2024-01-14",
        description: "Salary Direct Deposit",
        amount: 3245.67,
        category: "Income",
        account: "checking",
        location: "Electronic Transfer",
    },
    Transaction {
        date: "2024-01-13",
        description: "Whole Foods Market",
        amount: -127.89,
        category: "Groceries",
        account: "checking",
        location: "Detroit, MI",
    },
    Transaction {
        date: "2024-01-13",
        description: "Shell Gas Station",
        amount: -52.34,
        category: "Transportation",
        account: "credit",
        location: "Detroit, MI",
    },
    Transaction {
        date: "2024-01-12",
        description: "Transfer to Savings",
        amount: -500.00,
        category: "Transfer",
        account: "checking",
        location: "Online Banking",
    },
    Transaction {
        date: "2024-01-12",
        description: "Investment Dividend",
        amount: 89.45,
        category: "Investment Income",
        account: "investment",
        location: "Electronic Transfer",
    },
    Transaction {
        date: "2024-01-11",
        description: "Credit Card Payment",
        amount: -800.00,
        category: "Payment",
        account: "checking",
        location: "Online Banking",
    },
];
