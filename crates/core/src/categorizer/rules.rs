//! Ordered rule table.
//!
//! The table holds two ordered groups of `(category, polarity, patterns)` rule
//! sets. Declaration order is precedence: the first matching rule wins and no
//! attempt is made to prefer a longer or more specific match.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::category::{Category, Polarity};
use super::error::CategorizeError;

/// How a pattern is compared against a description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Regular expression searched anywhere in the description.
    #[default]
    Regex,
    /// Literal substring.
    Contains,
    /// Literal prefix.
    StartsWith,
}

/// A compiled, case-insensitive match pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    match_type: MatchType,
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if a `Regex` pattern does not compile.
    pub fn new(source: &str, match_type: MatchType) -> Result<Self, CategorizeError> {
        let expression = match match_type {
            MatchType::Regex => source.to_string(),
            MatchType::Contains => regex::escape(source),
            MatchType::StartsWith => format!("^{}", regex::escape(source)),
        };
        let regex = RegexBuilder::new(&expression)
            .case_insensitive(true)
            .build()
            .map_err(|source_err| CategorizeError::InvalidPattern {
                pattern: source.to_string(),
                source: source_err,
            })?;

        Ok(Self {
            source: source.to_string(),
            match_type,
            regex,
        })
    }

    /// Returns the pattern as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns how the pattern is matched.
    #[must_use]
    pub const fn match_type(&self) -> MatchType {
        self.match_type
    }

    /// Tests the pattern against a description.
    #[must_use]
    pub fn is_match(&self, description: &str) -> bool {
        self.regex.is_match(description)
    }
}

/// All patterns registered for one category.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Category assigned on match.
    pub category: Category,
    /// Direction a transaction must have for the rule to count.
    pub polarity: Polarity,
    /// Patterns, in registration order.
    pub patterns: Vec<Pattern>,
}

impl RuleSet {
    /// Returns true if any pattern matches the description.
    #[must_use]
    pub fn matches(&self, description: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(description))
    }
}

/// Built-in special rules. Evaluated before everything else, any polarity.
const SPECIAL_RULES: &[(Category, &[&str])] = &[
    (
        Category::MemberDrawing,
        &[r"zelle.*to", r"transfer.*to.*personal", r"withdrawal.*personal"],
    ),
    (
        Category::MemberContribution,
        &[
            r"deposit.*from.*personal",
            r"transfer.*from.*personal",
            r"capital.*contribution",
        ],
    ),
    (
        Category::LoanPayment,
        &[r"stripe.*capital", r"loan.*payment", r"sba.*payment"],
    ),
];

/// Built-in standard rules: revenue first, then costs and expenses.
const STANDARD_RULES: &[(Category, &[&str])] = &[
    (
        Category::SalesRevenue,
        &[
            r"stripe.*transfer",
            r"paypal.*transfer",
            r"square.*deposit",
            r"client.*payment",
            r"invoice.*payment",
            r"zelle.*from",
        ],
    ),
    (
        Category::InterestIncome,
        &[
            r"interest.*earned",
            r"savings.*interest",
            r"checking.*interest",
            r"dividend",
        ],
    ),
    (
        Category::OtherIncome,
        &[r"refund", r"cashback", r"reward", r"bonus"],
    ),
    (
        Category::ReturnsAndAllowances,
        &[r"return", r"chargeback", r"dispute", r"reversal"],
    ),
    (
        Category::CostOfService,
        &[
            r"contractor.*payment",
            r"freelancer",
            r"service.*provider",
            r"labor.*cost",
        ],
    ),
    (
        Category::SoftwareAndWebHosting,
        &[
            r"adobe",
            r"microsoft",
            r"google.*workspace",
            r"aws",
            r"azure",
            r"twilio",
            r"highlevel",
            r"zapier",
            r"notion",
            r"slack",
            r"zoom",
            r"dropbox",
            r"github",
            r"vercel",
            r"netlify",
        ],
    ),
    (
        Category::BusinessMeals,
        &[
            r"restaurant",
            r"starbucks",
            r"coffee",
            r"lunch",
            r"dinner",
            r"meal",
            r"food.*business",
            r"in-n-out",
            r"mcdonalds",
            r"subway",
            r"chipotle",
        ],
    ),
    (
        Category::GasAndAuto,
        &[
            r"shell",
            r"exxon",
            r"chevron",
            r"bp",
            r"gas.*station",
            r"fuel",
            r"auto.*repair",
            r"car.*wash",
            r"parking",
            r"toll",
        ],
    ),
    (
        Category::BankAndAtmFees,
        &[
            r"wells.*fargo.*fee",
            r"atm.*fee",
            r"overdraft",
            r"monthly.*fee",
            r"service.*charge",
            r"wire.*fee",
        ],
    ),
    (
        Category::AutoInsurance,
        &[
            r"auto.*insurance",
            r"car.*insurance",
            r"geico",
            r"state.*farm.*auto",
            r"progressive.*auto",
        ],
    ),
    (
        Category::BusinessInsurance,
        &[
            r"business.*insurance",
            r"liability.*insurance",
            r"professional.*insurance",
            r"errors.*omissions",
        ],
    ),
    (
        Category::MerchantFees,
        &[
            r"stripe.*fee",
            r"paypal.*fee",
            r"square.*fee",
            r"processing.*fee",
            r"transaction.*fee",
        ],
    ),
    (
        Category::OfficeSupplies,
        &[
            r"office.*depot",
            r"staples",
            r"amazon.*office",
            r"paper",
            r"supplies",
            r"printer",
            r"ink",
        ],
    ),
    (
        Category::PhoneAndInternet,
        &[
            r"verizon",
            r"at&t",
            r"comcast",
            r"cox.*internet",
            r"spectrum",
            r"phone.*bill",
            r"internet.*service",
            r"cellular",
        ],
    ),
    (
        Category::ProfessionalServices,
        &[
            r"bench.*accounting",
            r"lawyer",
            r"attorney",
            r"accountant",
            r"consultant",
            r"professional.*service",
            r"legal.*fee",
        ],
    ),
    (
        Category::Rent,
        &[r"rent", r"lease", r"office.*space", r"co.*working"],
    ),
    (
        Category::Utilities,
        &[
            r"electric",
            r"gas.*utility",
            r"water.*bill",
            r"sewer",
            r"trash",
            r"utility",
        ],
    ),
];

/// Ordered special and standard rule groups.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    special: Vec<RuleSet>,
    standard: Vec<RuleSet>,
}

impl RuleTable {
    /// Creates an empty table. Every transaction falls back.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compiles the built-in bookkeeping rules.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in pattern fails to compile.
    pub fn builtin() -> Result<Self, CategorizeError> {
        let special = SPECIAL_RULES
            .iter()
            .map(|(category, patterns)| compile(category.clone(), Polarity::Any, patterns))
            .collect::<Result<Vec<_>, _>>()?;
        let standard = STANDARD_RULES
            .iter()
            .map(|(category, patterns)| {
                compile(category.clone(), category.standard_polarity(), patterns)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { special, standard })
    }

    /// Special rule sets, in evaluation order.
    #[must_use]
    pub fn special(&self) -> &[RuleSet] {
        &self.special
    }

    /// Standard rule sets, in evaluation order.
    #[must_use]
    pub fn standard(&self) -> &[RuleSet] {
        &self.standard
    }

    /// Total number of patterns across both groups.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.special
            .iter()
            .chain(&self.standard)
            .map(|set| set.patterns.len())
            .sum()
    }

    /// Appends a pattern to the standard group under `category`.
    ///
    /// The bucket is created at the end of the group if it does not exist.
    pub fn push_standard(&mut self, category: Category, pattern: Pattern) {
        if let Some(set) = self.standard.iter_mut().find(|s| s.category == category) {
            set.patterns.push(pattern);
            return;
        }
        let polarity = category.standard_polarity();
        self.standard.push(RuleSet {
            category,
            polarity,
            patterns: vec![pattern],
        });
    }

    /// First special rule matching the (lowercased) description.
    #[must_use]
    pub fn match_special(&self, description: &str) -> Option<&Category> {
        self.special
            .iter()
            .find(|set| set.matches(description))
            .map(|set| &set.category)
    }

    /// First standard rule whose pattern and polarity both match.
    #[must_use]
    pub fn match_standard(&self, description: &str, is_income: bool) -> Option<&Category> {
        self.standard
            .iter()
            .find(|set| set.polarity.admits(is_income) && set.matches(description))
            .map(|set| &set.category)
    }
}

fn compile(
    category: Category,
    polarity: Polarity,
    sources: &[&str],
) -> Result<RuleSet, CategorizeError> {
    let patterns = sources
        .iter()
        .map(|source| Pattern::new(source, MatchType::Regex))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RuleSet {
        category,
        polarity,
        patterns,
    })
}
