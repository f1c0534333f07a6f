use biometrics::{Collector, Counter};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("aport.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("aport.client.request_errors");

pub(crate) static AUTH_REGISTRATIONS: Counter = Counter::new("aport.auth.registrations");
pub(crate) static AUTH_LOGINS: Counter = Counter::new("aport.auth.logins");
pub(crate) static AUTH_VALIDATION_FAILURES: Counter =
    Counter::new("aport.auth.validation_failures");

pub(crate) static DOCUMENT_LISTS: Counter = Counter::new("aport.documents.lists");
pub(crate) static DOCUMENT_UPLOADS: Counter = Counter::new("aport.documents.uploads");

pub(crate) static CHAT_SENDS: Counter = Counter::new("aport.chat.sends");
pub(crate) static CHAT_FAILURES: Counter = Counter::new("aport.chat.failures");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);

    collector.register_counter(&AUTH_REGISTRATIONS);
    collector.register_counter(&AUTH_LOGINS);
    collector.register_counter(&AUTH_VALIDATION_FAILURES);

    collector.register_counter(&DOCUMENT_LISTS);
    collector.register_counter(&DOCUMENT_UPLOADS);

    collector.register_counter(&CHAT_SENDS);
    collector.register_counter(&CHAT_FAILURES);
}
