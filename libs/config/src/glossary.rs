//! Glossary of cap table and exit terms
//!
//! Plain-language definitions shown next to the calculator's inputs and
//! results, grouped by category.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GlossaryCategory {
    General,
    Valuation,
    Securities,
    Control,
    Fundraising,
}

impl GlossaryCategory {
    pub const ALL: [GlossaryCategory; 5] = [
        Self::General,
        Self::Valuation,
        Self::Securities,
        Self::Control,
        Self::Fundraising,
    ];

    /// Heading used when listing a category
    pub fn title(self) -> &'static str {
        match self {
            Self::General => "General Terms",
            Self::Valuation => "Valuation Terms",
            Self::Securities => "Securities & Instruments",
            Self::Control => "Control & Rights",
            Self::Fundraising => "Fundraising",
        }
    }
}

impl fmt::Display for GlossaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::General => "general",
            Self::Valuation => "valuation",
            Self::Securities => "securities",
            Self::Control => "control",
            Self::Fundraising => "fundraising",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown glossary category '{0}' - expected general, valuation, securities, control or fundraising")]
pub struct UnknownCategory(pub String);

impl FromStr for GlossaryCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.to_string() == wanted)
            .ok_or(UnknownCategory(wanted))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlossaryTerm {
    pub key: &'static str,
    pub term: &'static str,
    pub definition: &'static str,
    pub category: GlossaryCategory,
}

macro_rules! term {
    ($key:literal, $category:ident, $term:literal, $definition:literal) => {
        GlossaryTerm {
            key: $key,
            term: $term,
            definition: $definition,
            category: GlossaryCategory::$category,
        }
    };
}

pub static GLOSSARY: Lazy<Vec<GlossaryTerm>> = Lazy::new(|| {
    vec![
        term!("equity", General, "Equity",
            "Ownership stake in a company, expressed as a percentage. In startups, equity is the currency used to buy capital (from investors) and talent (from employees). Equity holders share in profits and losses in proportion to their ownership."),
        term!("dilution", General, "Dilution",
            "The reduction in existing shareholders' ownership percentage when new shares are issued. The slice shrinks but the pie (company value) grows, so the value of each holding should increase."),
        term!("pro-rata", General, "Pro-Rata",
            "Latin for \"in proportion\". Distributing something by ownership percentage: owning 20% of a company when $10M is distributed pro-rata pays $2M. Used to split exit proceeds, and in funding rounds where existing investors keep their ownership by investing proportionally."),
        term!("cap-table", Control, "Cap Table (Capitalization Table)",
            "The master record of who owns what in the company: every shareholder, their share count and ownership percentage. Updated after every funding round, employee grant or ownership change."),
        term!("pre-money-valuation", Valuation, "Pre-Money Valuation",
            "What the company is worth before receiving new investment. The starting point for calculating how much equity investors receive. A higher pre-money means less dilution for founders."),
        term!("post-money-valuation", Valuation, "Post-Money Valuation",
            "The company's value immediately after investment: pre-money valuation plus the amount invested. This is the new total against which ownership percentages are calculated."),
        term!("price-per-share", Valuation, "Price Per Share (PPS)",
            "The dollar value of one share, calculated as pre-money valuation divided by fully diluted shares. Determines how many shares investors receive for their investment."),
        term!("down-round", Valuation, "Down Round",
            "A funding round at a lower valuation than the previous one. Signals that the company has lost value and often triggers anti-dilution protections, which makes it painful for founders and early investors."),
        term!("common-stock", Securities, "Common Stock",
            "The shares founders and employees typically own. Carries fewer rights than preferred stock; in an exit, common stockholders are paid after preferred stockholders."),
        term!("preferred-stock", Securities, "Preferred Stock",
            "The shares VCs and institutional investors buy. Comes with preferences such as being paid first in an exit (liquidation preference), anti-dilution protection and voting rights on major decisions."),
        term!("safe", Securities, "SAFE (Simple Agreement for Future Equity)",
            "An early-stage instrument that is neither debt nor equity yet: a promise of equity when a priced round happens. SAFEs convert to shares at a discount or at a valuation cap."),
        term!("convertible-note", Securities, "Convertible Note",
            "Similar to a SAFE but structured as debt with an interest rate and maturity date. Converts to equity at the next priced round, typically with a discount or valuation cap to reward early risk."),
        term!("valuation-cap", Securities, "Valuation Cap",
            "The maximum valuation at which a SAFE or convertible note converts to equity. If the company raises at $50M but the cap is $10M, early investors convert at the $10M price."),
        term!("liquidation-preference", Control, "Liquidation Preference",
            "How much of the exit proceeds an investor is paid before common stockholders receive anything: the multiplier (1x, 2x, ...) times the amount invested. A $5M investment at 1x in a $20M exit takes $5M first and the remaining $15M is split; at 2x it takes $10M first. If the exit is smaller than total preferences, investors split it pro-rata and founders get nothing."),
        term!("participating-preferred", Control, "Participating Preferred",
            "Investors take their liquidation preference and also their pro-rata share of what remains. An investor owning 20% with $2M at 1x participating in a $10M exit receives $2M plus 20% of the remaining $8M, $3.6M in total. Participation favors investors and reduces founder payouts."),
        term!("non-participating", Control, "Non-Participating Preferred",
            "Investors choose the better of their liquidation preference or converting to common and taking their pro-rata share, but not both. Owning 20% with $1M at 1x: in a $10M exit they convert and take $2M; in a $4M exit they take the $1M preference instead of $800K."),
        term!("option-pool", Control, "Option Pool",
            "Shares reserved (typically 10-20%) for future employee stock options. Lets a company offer equity instead of higher salaries when cash is tight. Usually created before a major round to attract talent."),
        term!("option-pool-shuffle", Control, "Option Pool Shuffle",
            "A negotiation tactic where investors require the option pool to be created before they invest, sized from the pre-money valuation. Founders then bear all of the dilution for future hires."),
        term!("pre-money-option-pool", Control, "Pre-Money Option Pool",
            "An option pool created before investment and carved from founder shares. It does not dilute incoming investors. Typically set up at incorporation, before Seed or Series A, or before key hires."),
        term!("post-money-option-pool", Control, "Post-Money Option Pool",
            "An option pool created after investment, sized as a percentage of the post-money company. It dilutes everyone equally, including the new investors, which is less favorable to founders than it sounds."),
        term!("vesting", Control, "Vesting",
            "Earning equity over time. The standard is four years with a one-year cliff. Founder shares are often re-vested after investment, so leaving in the first year forfeits most of the equity."),
        term!("board-seat", Control, "Board Seat",
            "A position on the board of directors. Investors often require one as part of their terms. The board votes on major decisions such as exits, CEO changes and future fundraising."),
        term!("funding-round", Fundraising, "Funding Round",
            "A discrete period during which a startup raises capital. Rounds are named Seed, Series A, B, C and so on. Earlier rounds are smaller, riskier and priced at lower valuations."),
        term!("seed-round", Fundraising, "Seed Round",
            "The first significant external funding, typically $500K-$3M, used to prove product-market fit. Often raised from angels, seed funds or accelerators."),
        term!("series-a", Fundraising, "Series A",
            "The first major VC round, typically $5M-$15M. Usually requires proven traction in revenue, users or growth. Investors take preferred stock with full rights and often a board seat."),
        term!("term-sheet", Fundraising, "Term Sheet",
            "A non-binding document outlining the key terms of a proposed investment: valuation, amount, liquidation preferences, board composition and control provisions."),
        term!("lead-investor", Fundraising, "Lead Investor",
            "The investor who sets the terms and takes the largest part of the round. Negotiates the term sheet and runs due diligence; other investors usually follow the same terms."),
        term!("due-diligence", Fundraising, "Due Diligence",
            "The phase in which investors verify the company's claims by examining contracts, IP ownership, financials, legal matters and customer references before finalizing an investment."),
        term!("pro-forma", Fundraising, "Pro Forma Cap Table",
            "A forward-looking cap table showing projected ownership after a proposed transaction such as a funding round or option grant."),
        term!("exit", General, "Exit",
            "An event that lets investors and founders turn their equity into cash. Common exits are an IPO (going public), an acquisition (being bought) or a secondary sale (selling shares privately)."),
        term!("ipo", General, "IPO (Initial Public Offering)",
            "Offering shares to the public on a stock exchange. Provides liquidity for all shareholders but requires significant revenue, compliance work and ongoing public reporting."),
        term!("acquisition", General, "Acquisition",
            "Another company buys the startup, paying cash, stock or both. Proceeds are distributed according to the exit waterfall: preferences first, then common stockholders."),
        term!("exit-waterfall", General, "Exit Waterfall",
            "The order in which exit proceeds are distributed: debt holders, then preferred stockholders' liquidation preferences, then participating preferred, then common stockholders."),
        term!("founder", General, "Founder",
            "A person who starts a company. Founders typically receive significant common stock, are responsible for the company's vision, and usually vest their shares over four years."),
        term!("investor", General, "Investor",
            "A person or entity providing capital in exchange for equity: angels (individuals), VCs (funds) or strategic investors (corporations), each with different check sizes and expectations."),
        term!("escrow", General, "Escrow / Holdback",
            "Part of the acquisition price (typically 10-20%) held back for 12-24 months to cover claims, breaches of representations or indemnification. Released to the sellers if no claims are made."),
        term!("management-carveout", General, "Management Carve-out",
            "A bonus pool for key employees in an acquisition, paid before the exit waterfall to retain management through the transition. Reduces the proceeds available to shareholders."),
        term!("transaction-costs", General, "Transaction Costs",
            "Fees for completing an acquisition: investment banking, legal, accounting and other advisory costs. Typically 1-3% of deal value, paid from proceeds before distribution."),
        term!("deal-structure", General, "Deal Structure",
            "How the acquisition price is paid. Cash gives immediate liquidity; stock gives shares in the acquirer, usually subject to a lockup; mixed deals combine both. Stock may defer taxes but carries the risk of the acquirer's share price falling."),
        term!("underwriter-fees", General, "Underwriter Fees",
            "Commission paid to the investment banks managing an IPO, typically 5-7% of gross proceeds. Covers due diligence, regulatory filings, pricing and placing shares with institutional investors."),
        term!("lockup-period", General, "Lockup Period",
            "A restriction preventing insiders (founders, employees, early investors) from selling shares after an IPO, typically 90-180 days, to keep the market from being flooded."),
        term!("secondary-offering", General, "Secondary Offering",
            "Existing shareholders selling their shares in an IPO rather than the company issuing new ones. Provides liquidity for early holders but raises no new capital for the company."),
    ]
});

pub fn term_by_key(key: &str) -> Option<&'static GlossaryTerm> {
    GLOSSARY.iter().find(|t| t.key == key)
}

pub fn terms_in(category: GlossaryCategory) -> impl Iterator<Item = &'static GlossaryTerm> {
    GLOSSARY.iter().filter(move |t| t.category == category)
}

/// Terms whose key or display name contains `query`, ignoring case
pub fn search(query: &str) -> Vec<&'static GlossaryTerm> {
    let query = query.trim().to_lowercase();
    GLOSSARY
        .iter()
        .filter(|t| t.key.contains(query.as_str()) || t.term.to_lowercase().contains(query.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<&str> = GLOSSARY.iter().map(|t| t.key).collect();
        assert_eq!(keys.len(), GLOSSARY.len());
        assert!(GLOSSARY.len() >= 35);
    }

    #[test]
    fn test_every_category_has_terms() {
        for category in GlossaryCategory::ALL {
            assert!(terms_in(category).count() > 0, "no terms for {category}");
        }
        assert_eq!(terms_in(GlossaryCategory::Valuation).count(), 4);
    }

    #[test]
    fn test_lookup_by_key() {
        let term = term_by_key("liquidation-preference").unwrap();
        assert_eq!(term.category, GlossaryCategory::Control);
        assert!(term.definition.contains("pro-rata"));
        assert!(term_by_key("unobtainium").is_none());
    }

    #[test]
    fn test_search_matches_key_and_name() {
        let hits: Vec<&str> = search("Option Pool").iter().map(|t| t.key).collect();
        assert!(hits.contains(&"option-pool"));
        assert!(hits.contains(&"option-pool-shuffle"));

        assert_eq!(search("IPO").first().map(|t| t.key), Some("ipo"));
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Control".parse::<GlossaryCategory>(), Ok(GlossaryCategory::Control));
        assert_eq!(
            "legal".parse::<GlossaryCategory>(),
            Err(UnknownCategory("legal".to_string()))
        );
        assert_eq!(GlossaryCategory::Securities.title(), "Securities & Instruments");
    }
}
