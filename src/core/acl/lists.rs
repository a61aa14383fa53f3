//! The gateway's fixed perimeter lists
//!
//! Reproduced verbatim from the deployed gateway. Duplicate entries are kept
//! as-is.

/// Paths admitted on the internal listener
pub const INTERNAL_ALLOW_LIST: &[&str] = &[
    "/bytes",
    "/bytes/*",
    "/chunks",
    "/chunks/*",
    "/bzz*",
    "/tags*",
    "/pins*",
    "/pss/send/*",
    "/pss/subscribe/*",
    "/soc/*",
    "/feeds/*",
    "/stamps",
    "/stamps/*",
    "/stamps/topup/*",
    "/stamps/dilute/*",
    "/addresses",
    "/blocklist",
    "/connect/*",
    "/peers",
    "/peers/*",
    "/pingpong/*",
    "/topology",
    "/welcome-message",
    "/balances",
    "/balances/*",
    "/chequebook/cashout/*",
    "/chequebook/cashout/*",
    "/chequebook/withdraw*",
    "/chequebook/deposit*",
    "/chequebook/cheque*",
    "/chequebook/address",
    "/chequebook/balance",
    "/chunks/*",
    "/reservestate",
    "/chainstate",
    "/settlements",
    "/settlements/*",
    "/transactions",
    "/transactions/*",
    "/consumed",
    "/consumed/*",
    "/chunks/stream",
    "/stewardship/*",
];

/// Paths rejected on the external listener
pub const EXTERNAL_DENY_LIST: &[&str] = &["/node", "/health", "/readiness", "/debug/*"];
