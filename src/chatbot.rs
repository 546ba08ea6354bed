//! Keyword-matching banking FAQ responder

use crate::types::{ChatQuery, ChatReply};
use tracing::debug;

/// Keyword to reply table, checked in order
const RESPONSES: [(&str, &str); 5] = [
    ("balance", "Your account balance is $2,540.32."),
    (
        "transactions",
        "You have 5 transactions this week: $25.40 at Coffee Shop, $67.89 at Supermarket, \
         $45.00 gas station, $12.50 online purchase, $120.00 rent payment.",
    ),
    (
        "hours",
        "Our branches are open Monday-Friday 9AM-5PM, Saturday 10AM-2PM. \
         Our online services are available 24/7.",
    ),
    (
        "fees",
        "There are no monthly maintenance fees if your balance stays above $1,500. \
         ATM fees are $2.50 for out-of-network ATMs.",
    ),
    (
        "contact",
        "You can reach our customer service at 1-800-BANK-HELP or visit our website \
         for live chat support.",
    ),
];

const DEFAULT_RESPONSE: &str = "Thank you for your inquiry. I've forwarded your question to a \
     customer service representative who will contact you shortly.";

/// Returns the first canned reply whose keyword appears in the message.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatResponder;

impl ChatResponder {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &'static str {
        "keyword_chatbot"
    }

    /// Case-insensitive substring match; falls back to the default reply
    pub fn respond(&self, query: &ChatQuery) -> ChatReply {
        let message = query.message.to_lowercase();

        let (keyword, response) = RESPONSES
            .iter()
            .find(|(keyword, _)| message.contains(keyword))
            .copied()
            .unwrap_or(("default", DEFAULT_RESPONSE));

        debug!(keyword = keyword, "Chat reply selected");

        ChatReply {
            response: response.to_string(),
        }
    }

    /// Reply for a keyword, or the default reply for anything else
    pub fn reply_for(keyword: &str) -> &'static str {
        RESPONSES
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|(_, reply)| *reply)
            .unwrap_or(DEFAULT_RESPONSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(message: &str) -> String {
        ChatResponder::new().respond(&ChatQuery::new(message)).response
    }

    #[test]
    fn test_keyword_match() {
        assert_eq!(ask("What are your hours?"), ChatResponder::reply_for("hours"));
        assert_eq!(ask("how do I CONTACT you"), ChatResponder::reply_for("contact"));
        assert!(ask("balance").starts_with("Your account balance"));
    }

    #[test]
    fn test_default_reply() {
        assert_eq!(ask("asdf"), DEFAULT_RESPONSE);
        assert_eq!(ask(""), DEFAULT_RESPONSE);
        assert_eq!(ChatResponder::reply_for("default"), DEFAULT_RESPONSE);
    }

    #[test]
    fn test_first_keyword_in_table_order_wins() {
        // "fees" comes after "balance" in the table even though it appears first here
        assert_eq!(
            ask("Fees on a low balance?"),
            ChatResponder::reply_for("balance")
        );
    }

    #[test]
    fn test_substring_containment() {
        assert_eq!(ask("show my recent transactions"), ChatResponder::reply_for("transactions"));
        assert_eq!(ask("whatsthe BALANCEtoday"), ChatResponder::reply_for("balance"));
    }

    #[test]
    fn test_default_keyword_is_not_matchable() {
        assert_eq!(ask("what is the default rate"), DEFAULT_RESPONSE);
    }
}
