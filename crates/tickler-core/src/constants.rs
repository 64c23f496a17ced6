/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const TASK_ROUTE_COMPONENT: &str = "task";
pub const TASK_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", TASK_ROUTE_COMPONENT);

pub const TASK_DONE_ROUTE_COMPONENT: &str = "done";
pub const TASK_DONE_ROUTE_PREFIX: &str =
    const_str::concat!(TASK_ROUTE_PREFIX, "/", TASK_DONE_ROUTE_COMPONENT);

pub const TASKS_ROUTE_COMPONENT: &str = "tasks";
pub const TASKS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", TASKS_ROUTE_COMPONENT);

pub const NEXT_DATE_ROUTE_COMPONENT: &str = "nextdate";
pub const NEXT_DATE_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", NEXT_DATE_ROUTE_COMPONENT);

pub const SIGN_IN_ROUTE_COMPONENT: &str = "signin";
pub const SIGN_IN_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", SIGN_IN_ROUTE_COMPONENT);

/// Cookie the web client stores the session token in.
pub const TOKEN_COOKIE: &str = "token";

/// Upper bound on the stored recurrence rule, mirrors the `repeat` column width.
pub const MAX_REPEAT_LEN: usize = 128;

/// Day-first date format accepted by the task search box.
pub const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";
