//! Randomized test identities and the per-run account state.
//!
//! Every run registers a brand-new customer, so the generator's one hard
//! requirement is that usernames never collide: a process-wide counter
//! separates calls within a process, and a timestamp plus random tail
//! separates runs racing from different processes. Everything else is
//! realistic-looking filler drawn from curated lists.

use crate::money::Money;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// A customer to register with the bank. Generated once per run, never
/// mutated afterwards.
#[derive(Clone, Debug)]
pub struct UserRecord {
    /// Given name, also the stem of the generated username.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Street address line.
    pub street: String,
    /// City.
    pub city: String,
    /// State, spelled out.
    pub state: String,
    /// Five-digit zip code.
    pub zip: String,
    /// Ten-digit phone number.
    pub phone: String,
    /// Social security number in `###-##-####` form.
    pub ssn: String,
    /// Collision-free login name.
    pub username: String,
    /// Login password.
    pub password: String,
}

/// The receiving side of a bill payment. Independent of any [`UserRecord`].
#[derive(Clone, Debug)]
pub struct PayeeRecord {
    /// The name typed into the payee name field. The bank echoes it into the
    /// transaction description, so verification reads it back verbatim.
    pub first_name: String,
    /// Street address line.
    pub street: String,
    /// City.
    pub city: String,
    /// State, spelled out.
    pub state: String,
    /// Five-digit zip code.
    pub zip: String,
    /// Ten-digit phone number.
    pub phone: String,
    /// The payee's account number at their own bank.
    pub account: String,
}

/// The account a run opens, with the balance most recently read from the UI.
///
/// The number is assigned exactly once, from the open-account readback, and
/// never changes. The balance field always holds the last value the accounts
/// overview showed; no shadow bookkeeping happens beyond the single
/// expected-delta check per money movement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountState {
    /// Account number as rendered by the UI.
    pub number: String,
    /// Balance most recently read back from the accounts overview.
    pub balance: Money,
}

impl AccountState {
    /// The balance the overview must show after debiting `amount`.
    pub fn debit(&self, amount: Money) -> Money {
        self.balance - amount
    }
}

/// Generate a fresh customer with a collision-free username.
pub fn generate_user() -> UserRecord {
    let mut rng = rand::thread_rng();
    let first = pick(&mut rng, FIRST_NAMES);
    let username = format!("{}{}", first.to_lowercase(), unique_tail());
    UserRecord {
        first_name: first.to_string(),
        last_name: pick(&mut rng, LAST_NAMES).to_string(),
        street: street_address(&mut rng),
        city: pick(&mut rng, CITIES).to_string(),
        state: pick(&mut rng, STATES).to_string(),
        zip: rng.gen_range(10_000..=99_999u32).to_string(),
        phone: rng.gen_range(2_000_000_000..=9_999_999_999u64).to_string(),
        ssn: format!(
            "{}-{}-{}",
            rng.gen_range(100..=899),
            rng.gen_range(10..=99),
            rng.gen_range(1_000..=9_999)
        ),
        username,
        password: format!("Pw-{}", unique_tail()),
    }
}

/// Generate a payee for a bill payment.
pub fn generate_payee() -> PayeeRecord {
    let mut rng = rand::thread_rng();
    PayeeRecord {
        first_name: pick(&mut rng, FIRST_NAMES).to_string(),
        street: street_address(&mut rng),
        city: pick(&mut rng, CITIES).to_string(),
        state: pick(&mut rng, STATES).to_string(),
        zip: rng.gen_range(10_000..=99_999u32).to_string(),
        phone: rng.gen_range(2_000_000_000..=9_999_999_999u64).to_string(),
        account: rng.gen_range(10_000..=99_999u32).to_string(),
    }
}

static SEQ: AtomicU64 = AtomicU64::new(0);

// Counter first: two calls in the same millisecond still differ.
fn unique_tail() -> String {
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let salt = rand::thread_rng().gen_range(0..1_000u16);
    format!("{}{:x}{:03}", seq, millis, salt)
}

fn street_address<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", rng.gen_range(1..=9_999u32), pick(rng, STREETS))
}

fn pick<'a, R: Rng>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Daniel", "Karen", "Matthew", "Lisa", "Kevin", "Nancy", "Brian", "Sandra", "George", "Ashley",
    "Timothy", "Emily", "Ronald", "Donna", "Jason", "Michelle", "Edward", "Carol", "Ryan",
    "Amanda", "Jacob", "Melissa",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young",
];

const STREETS: &[&str] = &[
    "Maple Street",
    "Oak Avenue",
    "Cedar Lane",
    "Elm Drive",
    "Pine Road",
    "Washington Boulevard",
    "Lake View Terrace",
    "Hillcrest Court",
    "Riverside Drive",
    "Sunset Avenue",
    "Park Place",
    "Birch Hollow",
];

const CITIES: &[&str] = &[
    "Springfield",
    "Riverton",
    "Fairview",
    "Georgetown",
    "Clinton",
    "Salem",
    "Madison",
    "Arlington",
    "Ashland",
    "Burlington",
    "Clayton",
    "Dayton",
];

const STATES: &[&str] = &[
    "California",
    "Texas",
    "Florida",
    "New York",
    "Pennsylvania",
    "Illinois",
    "Ohio",
    "Georgia",
    "North Carolina",
    "Michigan",
    "Washington",
    "Colorado",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn usernames_never_collide() {
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let user = generate_user();
            assert!(
                seen.insert(user.username.clone()),
                "duplicate username {}",
                user.username
            );
        }
    }

    #[test]
    fn generated_user_fills_every_field() {
        let user = generate_user();
        for (field, value) in [
            ("first_name", &user.first_name),
            ("last_name", &user.last_name),
            ("street", &user.street),
            ("city", &user.city),
            ("state", &user.state),
            ("zip", &user.zip),
            ("phone", &user.phone),
            ("ssn", &user.ssn),
            ("username", &user.username),
            ("password", &user.password),
        ] {
            assert!(!value.is_empty(), "{} is empty", field);
        }
        assert!(user.username.starts_with(&user.first_name.to_lowercase()));
        assert_eq!(user.zip.len(), 5);
        assert!(user.zip.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(user.phone.len(), 10);
        assert_eq!(user.ssn.len(), 11);
        assert_eq!(&user.ssn[3..4], "-");
        assert_eq!(&user.ssn[6..7], "-");
    }

    #[test]
    fn generated_payee_has_an_account_number() {
        let payee = generate_payee();
        assert!(!payee.first_name.is_empty());
        assert!(!payee.account.is_empty());
        assert!(payee.account.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn debit_computes_the_next_expected_balance() {
        let account = AccountState {
            number: "13344".to_string(),
            balance: Money::parse("$515.50").unwrap(),
        };
        assert_eq!(account.debit(Money::from_cents(1_000)), Money::parse("$505.50").unwrap());
        // the observed balance itself is untouched
        assert_eq!(account.balance, Money::parse("$515.50").unwrap());
    }
}
