use crate::models::Direction;

// (merchant fragment, category), checked in order. Earlier sections win when
// a name contains fragments from more than one.
const MERCHANT_CATEGORIES: &[(&str, &str)] = &[
    // Food & dining
    ("swiggy", "Food & Dining"),
    ("zomato", "Food & Dining"),
    ("uber eats", "Food & Dining"),
    ("dominos", "Food & Dining"),
    ("pizza hut", "Food & Dining"),
    ("mcdonalds", "Food & Dining"),
    ("kfc", "Food & Dining"),
    ("starbucks", "Food & Dining"),
    ("cafe coffee day", "Food & Dining"),
    ("ccd", "Food & Dining"),
    ("barista", "Food & Dining"),
    // Transport
    ("uber", "Transport"),
    ("ola", "Transport"),
    ("rapido", "Transport"),
    ("zoomcar", "Transport"),
    ("revv", "Transport"),
    ("metro", "Transport"),
    ("irctc", "Transport"),
    ("makemytrip", "Transport"),
    ("goibibo", "Transport"),
    ("ixigo", "Transport"),
    ("redbus", "Transport"),
    ("indigo", "Transport"),
    ("spicejet", "Transport"),
    ("air india", "Transport"),
    ("vistara", "Transport"),
    // Shopping
    ("amazon", "Shopping"),
    ("flipkart", "Shopping"),
    ("myntra", "Shopping"),
    ("nykaa", "Shopping"),
    ("ajio", "Shopping"),
    ("meesho", "Shopping"),
    ("snapdeal", "Shopping"),
    ("paytm mall", "Shopping"),
    ("bigbasket", "Shopping"),
    ("grofers", "Shopping"),
    ("reliance", "Shopping"),
    ("dmart", "Shopping"),
    // Entertainment
    ("netflix", "Entertainment"),
    ("prime video", "Entertainment"),
    ("hotstar", "Entertainment"),
    ("sony liv", "Entertainment"),
    ("zee5", "Entertainment"),
    ("voot", "Entertainment"),
    ("spotify", "Entertainment"),
    ("youtube premium", "Entertainment"),
    ("bookmyshow", "Entertainment"),
    ("pvr", "Entertainment"),
    ("inox", "Entertainment"),
    // Utilities
    ("bsnl", "Utilities"),
    ("airtel", "Utilities"),
    ("jio", "Utilities"),
    ("vodafone", "Utilities"),
    ("idea", "Utilities"),
    ("electricity", "Utilities"),
    ("water", "Utilities"),
    ("gas", "Utilities"),
    ("broadband", "Utilities"),
    ("wifi", "Utilities"),
    ("internet", "Utilities"),
    // Health
    ("pharmacy", "Health"),
    ("apollo", "Health"),
    ("fortis", "Health"),
    ("max", "Health"),
    ("medlife", "Health"),
    ("1mg", "Health"),
    ("pharmeasy", "Health"),
    ("netmeds", "Health"),
    ("practo", "Health"),
    ("hospital", "Health"),
    ("clinic", "Health"),
    ("doctor", "Health"),
    // Income
    ("salary", "Salary"),
    ("credit", "Salary"),
    ("refund", "Other Income"),
    ("cashback", "Other Income"),
    ("reward", "Other Income"),
    ("interest", "Investment"),
    ("dividend", "Investment"),
];

// (category, trigger keywords), consulted only when no merchant fragment hit.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Food & Dining",
        &["food", "restaurant", "cafe", "pizza", "burger", "coffee", "dining", "meal", "lunch", "dinner", "breakfast"],
    ),
    (
        "Transport",
        &["taxi", "cab", "ride", "metro", "train", "flight", "bus", "fuel", "petrol", "diesel", "parking"],
    ),
    (
        "Shopping",
        &["purchase", "buy", "order", "shopping", "mall", "store", "retail"],
    ),
    (
        "Entertainment",
        &["movie", "cinema", "streaming", "music", "game", "concert", "theatre"],
    ),
    (
        "Utilities",
        &["bill", "recharge", "electricity", "water", "gas", "phone", "internet", "broadband"],
    ),
    (
        "Health",
        &["medicine", "pharmacy", "hospital", "doctor", "clinic", "medical", "health"],
    ),
    ("Salary", &["salary", "payroll", "income", "credit"]),
    ("Investment", &["investment", "stocks", "mutual fund", "fd", "sip"]),
];

/// Map a merchant name onto a category. Exact table entry first, then
/// substring containment in both directions, then the keyword table. The
/// "Unknown" sentinel never matches.
pub fn match_merchant_to_category(merchant: &str) -> Option<&'static str> {
    let lowered = merchant.to_lowercase();
    let needle = lowered.trim();
    if needle.is_empty() || needle == "unknown" {
        return None;
    }
    for (fragment, category) in MERCHANT_CATEGORIES {
        if needle == *fragment {
            return Some(category);
        }
    }
    for (fragment, category) in MERCHANT_CATEGORIES {
        if needle.contains(fragment) || fragment.contains(needle) {
            return Some(category);
        }
    }
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| needle.contains(kw)) {
            return Some(category);
        }
    }
    None
}

/// Suggest a ledger category for a parsed transaction. Unmatched income above
/// the salary threshold defaults to Salary; everything else lands in the
/// catch-all buckets.
pub fn suggest_category(
    direction: Direction,
    merchant: &str,
    amount: f64,
    salary_threshold: f64,
) -> String {
    let matched = match_merchant_to_category(merchant);
    match direction {
        Direction::Income => {
            if let Some(cat) = matched {
                if cat == "Salary" || cat == "Investment" || cat == "Other Income" {
                    return cat.to_string();
                }
            }
            if amount > salary_threshold {
                "Salary".to_string()
            } else {
                "Other Income".to_string()
            }
        }
        Direction::Expense => match matched {
            Some(cat) if cat != "Salary" => cat.to_string(),
            _ => "Other Expense".to_string(),
        },
    }
}
