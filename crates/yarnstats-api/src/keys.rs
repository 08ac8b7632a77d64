//! Key names of the persisted state tree and monitoring-agent tokens

/// Top-level section holding scalar variables
pub const LOCAL_VARS_KEY: &str = "localVars";

/// Top-level section holding the application history ledger
pub const APPS_HISTORY_KEY: &str = "appsHistory";

/// Top-level section holding per-queue counters
pub const QUEUES_STATS_KEY: &str = "queuesStats";

/// Epoch seconds of the last successful poll
pub const LASTPOLL_AT: &str = "lastpoll_at";

/// Seconds since the last successful poll; derived at query time, never persisted
pub const LASTPOLL_AGO: &str = "lastpoll_ago";

/// Records promoted into the queue counters by the last poll
pub const LASTPOLL_ADDED: &str = "lastpoll_added";

/// Records purged from the history by the last poll
pub const LASTPOLL_REMOVED: &str = "lastpoll_removed";

/// Number of successful polls since the state file was created
pub const POLLS_TOTAL: &str = "polls_total";

/// Printed instead of a value when a query cannot be answered
pub const UNSUPPORTED_SENTINEL: &str = "ZBX_UNSUPPORTED";

/// Printed by the generic REST lookup when an item cannot be answered
pub const NOT_SUPPORTED_SENTINEL: &str = "ZBX_NOTSUPPORTED";
