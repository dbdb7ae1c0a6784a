//! Well-known mutual funds offered for selection. Any other ticker is still
//! accepted as-is.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fund {
    pub ticker: &'static str,
    pub name: &'static str,
}

const fn fund(ticker: &'static str, name: &'static str) -> Fund {
    Fund { ticker, name }
}

pub const FUNDS: &[Fund] = &[
    fund("VSMPX", "Vanguard Total Stock Market Index Fund;Institutional Plus"),
    fund("FXAIX", "Fidelity 500 Index Fund"),
    fund("VFIAX", "Vanguard 500 Index Fund;Admiral"),
    fund("VTSAX", "Vanguard Total Stock Market Index Fund;Admiral"),
    fund("SPAXX", "Fidelity Government Money Market Fund"),
    fund("VMFXX", "Vanguard Federal Money Market Fund;Investor"),
    fund("FDRXX", "Fidelity Government Cash Reserves"),
    fund("FGTXX", "Goldman Sachs FS Government Fund;Institutional"),
    fund("SWVXX", "Schwab Value Advantage Money Fund;Investor"),
    fund("VGTSX", "Vanguard Total International Stock Index Fund;Investor"),
    fund("VFFSX", "Vanguard 500 Index Fund;Institutional Select"),
    fund("VIIIX", "Vanguard Institutional Index Fund;Inst Plus"),
    fund("OGVXX", "JPMorgan US Government Money Market Fund;Capital"),
    fund("MVRXX", "Morgan Stanley Inst Liq Government Port;Institutional"),
    fund("VTBNX", "Vanguard Total Bond Market II Index Fund;Institutional"),
    fund("TFDXX", "BlackRock Liquidity FedFund;Institutional"),
    fund("FRGXX", "Fidelity Instl Government Portfolio;Institutional"),
    fund("TTTXX", "BlackRock Liquidity Treasury Trust Fund;Institutional"),
    fund("AGTHX", "American Funds Growth Fund of America;A"),
    fund("VTBIX", "Vanguard Total Bond Market II Index Fund;Investor"),
    fund("GVMXX", "State Street US Government Money Market Fund;Prem"),
    fund("FCTDX", "Fidelity Strategic Advisers Fidelity US Total Stk"),
    fund("FCNTX", "Fidelity Contrafund"),
    fund("VINIX", "Vanguard Institutional Index Fund;Institutional"),
    fund("VMRXX", "Vanguard Cash Reserves Federal Money Market Fd;Adm"),
];

/// Case-insensitive lookup by ticker.
pub fn lookup(ticker: &str) -> Option<&'static Fund> {
    FUNDS
        .iter()
        .find(|f| f.ticker.eq_ignore_ascii_case(ticker.trim()))
}
