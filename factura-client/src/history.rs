//! Per-currency exchange history carried by directory profiles.

use crate::remote::Remote;
use factura_core::ResourceResult;
use serde_json::Value;

/// Exchange statistics a buyer and a seller accumulate against each other.
pub trait ExchangeHistory: Remote {
    /// Currency codes with recorded exchanges.
    fn currencies(&mut self) -> ResourceResult<Vec<String>> {
        Ok(self
            .resource_mut()
            .attribute("currencies")?
            .and_then(|value| match value {
                Value::Array(items) => Some(
                    items
                        .into_iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect(),
                ),
                _ => None,
            })
            .unwrap_or_default())
    }

    /// Raw statistics for one currency (three-letter ISO code).
    fn currency_stats(&mut self, code: &str) -> ResourceResult<Option<Value>> {
        self.resource_mut().attribute(&code.to_ascii_uppercase())
    }

    /// Number of invoices exchanged.
    fn invoice_count(&mut self) -> ResourceResult<Option<i64>> {
        self.resource_mut().i64_attribute("invoicesCount")
    }

    /// Number of threads opened.
    fn thread_count(&mut self) -> ResourceResult<Option<i64>> {
        self.resource_mut().i64_attribute("threadsCount")
    }

    /// Number of messages exchanged.
    fn message_count(&mut self) -> ResourceResult<Option<i64>> {
        self.resource_mut().i64_attribute("messagesCount")
    }
}
