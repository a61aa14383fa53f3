//! The gateway's fixed policy surface
//!
//! Rule table and role chain, reproduced verbatim from the deployed gateway.

/// `(subject, resource pattern, action pattern)`
pub const RULES: &[(&str, &str, &str)] = &[
    // Content
    ("consumer", "/bytes/*", "GET"),
    ("creator", "/bytes", "POST"),
    ("consumer", "/chunks/*", "GET"),
    ("creator", "/chunks", "POST"),
    ("consumer", "/bzz/*", "GET"),
    ("creator", "/bzz/*", "PATCH"),
    ("creator", "/bzz", "POST"),
    ("creator", "/bzz?*", "POST"),
    ("consumer", "/bzz/*/*", "GET"),
    // Tags, pins, pss
    ("creator", "/tags", "GET"),
    ("creator", "/tags?*", "GET"),
    ("creator", "/tags", "POST"),
    ("creator", "/tags/*", "(GET)|(DELETE)|(PATCH)"),
    ("creator", "/pins/*", "(GET)|(DELETE)|(POST)"),
    ("maintainer", "/pins", "GET"),
    ("creator", "/pss/send/*", "POST"),
    ("consumer", "/pss/subscribe/*", "GET"),
    ("creator", "/soc/*/*", "POST"),
    ("creator", "/feeds/*/*", "POST"),
    ("consumer", "/feeds/*/*", "GET"),
    // Postage stamps
    ("maintainer", "/stamps", "GET"),
    ("maintainer", "/stamps/*", "GET"),
    ("maintainer", "/stamps/*/*", "POST"),
    ("maintainer", "/stamps/topup/*/*", "PATCH"),
    ("maintainer", "/stamps/dilute/*/*", "PATCH"),
    // Network and topology
    ("maintainer", "/addresses", "GET"),
    ("maintainer", "/blocklist", "GET"),
    ("maintainer", "/connect/*", "POST"),
    ("maintainer", "/peers", "GET"),
    ("maintainer", "/peers/*", "DELETE"),
    ("maintainer", "/pingpong/*", "POST"),
    ("maintainer", "/topology", "GET"),
    ("maintainer", "/welcome-message", "(GET)|(POST)"),
    // Finance
    ("maintainer", "/balances", "GET"),
    ("maintainer", "/balances/*", "GET"),
    ("maintainer", "/chequebook/cashout/*", "GET"),
    ("accountant", "/chequebook/cashout/*", "POST"),
    ("accountant", "/chequebook/withdraw", "POST"),
    ("accountant", "/chequebook/withdraw?*", "POST"),
    ("accountant", "/chequebook/deposit", "POST"),
    ("accountant", "/chequebook/deposit?*", "POST"),
    ("maintainer", "/chequebook/cheque/*", "GET"),
    ("maintainer", "/chequebook/cheque", "GET"),
    ("maintainer", "/chequebook/address", "GET"),
    ("maintainer", "/chequebook/balance", "GET"),
    ("maintainer", "/chunks/*", "(GET)|(DELETE)"),
    ("maintainer", "/reservestate", "GET"),
    ("maintainer", "/chainstate", "GET"),
    ("maintainer", "/settlements/*", "GET"),
    ("maintainer", "/settlements", "GET"),
    ("maintainer", "/transactions", "GET"),
    ("consumer", "/transactions/*", "GET"),
    ("accountant", "/transactions/*", "(POST)|(DELETE)"),
    ("consumer", "/consumed", "GET"),
    ("consumer", "/consumed/*", "GET"),
    ("consumer", "/chunks/stream", "GET"),
    ("creator", "/stewardship/*", "GET"),
    ("consumer", "/stewardship/*", "PUT"),
];

/// `(child, parent)`: the child inherits every permission of the parent
pub const ROLE_INHERITANCE: &[(&str, &str)] = &[
    ("creator", "consumer"),
    ("accountant", "creator"),
    ("maintainer", "accountant"),
];
