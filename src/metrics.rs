use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use once_cell::sync::Lazy;
use prometheus::{Encoder, Opts, TextEncoder};

/// Register additional metrics of our own structs by using this registry instance.
static REGISTRY: Lazy<Registry> = Lazy::new(|| Registry(prometheus::Registry::new()));

pub static CMD_START_COUNTER: Lazy<Counter> = Lazy::new(|| {
    Counter::new("command_start", Opts::new("command_start_usage_total", "count of /start invocations"))
});
pub static CMD_ADMIN: Lazy<ComplexCommandCounters> = Lazy::new(|| {
    let opts = Opts::new("command_admin_usage_total", "count of /admin invocations and successful grants");
    ComplexCommandCounters {
        invoked: Counter::new("command_admin (invoked)", opts.clone().const_label("state", "invoked")),
        finished: Counter::new("command_admin (finished)", opts.const_label("state", "finished")),
    }
});
pub static CMD_REVOKE_COUNTER: Lazy<Counter> = Lazy::new(|| {
    Counter::new("command_revoke", Opts::new("command_revoke_usage_total", "count of /revoke invocations"))
});
pub static WEBAPP_DATA_COUNTER: Lazy<WebAppDataCounters> = Lazy::new(|| {
    let opts = Opts::new("webapp_data_total", "count of data submissions from the Mini-App");
    WebAppDataCounters {
        enroll: Counter::new("webapp_data (enroll)", opts.clone().const_label("kind", "enroll")),
        admin_update: Counter::new("webapp_data (admin_update)", opts.clone().const_label("kind", "admin_update")),
        unrecognized: Counter::new("webapp_data (unrecognized)", opts.const_label("kind", "unrecognized")),
    }
});
pub static IGNORED_UPDATES_COUNTER: Lazy<IgnoredUpdatesCounters> = Lazy::new(|| {
    let opts = Opts::new("webhook_ignored_updates_total", "count of webhook requests acknowledged without processing");
    IgnoredUpdatesCounters {
        malformed: Counter::new("ignored_updates (malformed)", opts.clone().const_label("reason", "malformed")),
        unauthorized: Counter::new("ignored_updates (unauthorized)", opts.clone().const_label("reason", "unauthorized")),
        misconfigured: Counter::new("ignored_updates (misconfigured)", opts.const_label("reason", "misconfigured")),
    }
});
pub static SEND_FAILURES_COUNTER: Lazy<Counter> = Lazy::new(|| {
    Counter::new("send_failures", Opts::new("send_failures_total", "count of messages Telegram didn't accept"))
});


/// Adds `/metrics` to the app and counts HTTP requests on every route of it.
pub fn init(app: axum::Router) -> axum::Router {
    let prometheus = REGISTRY
        .register(&CMD_START_COUNTER)
        .register(&CMD_ADMIN.invoked)
        .register(&CMD_ADMIN.finished)
        .register(&CMD_REVOKE_COUNTER)
        .register(&WEBAPP_DATA_COUNTER.enroll)
        .register(&WEBAPP_DATA_COUNTER.admin_update)
        .register(&WEBAPP_DATA_COUNTER.unrecognized)
        .register(&IGNORED_UPDATES_COUNTER.malformed)
        .register(&IGNORED_UPDATES_COUNTER.unauthorized)
        .register(&IGNORED_UPDATES_COUNTER.misconfigured)
        .register(&SEND_FAILURES_COUNTER)
        .unwrap();

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
    app
        .route("/metrics", get(|| async move {
            let mut buffer = vec![];
            let metrics = prometheus.gather();
            if let Err(e) = TextEncoder::new().encode(&metrics, &mut buffer) {
                log::error!("couldn't encode the metrics: {e}");
            }
            let custom_metrics = String::from_utf8_lossy(&buffer).into_owned();

            metric_handle.render() + custom_metrics.as_str()
        }))
        .layer(prometheus_layer)
}

pub struct Counter {
    inner: prometheus::Counter,
    name: String
}
pub struct ComplexCommandCounters {
    invoked: Counter,
    finished: Counter,
}
pub struct WebAppDataCounters {
    pub enroll: Counter,
    pub admin_update: Counter,
    pub unrecognized: Counter,
}
pub struct IgnoredUpdatesCounters {
    pub malformed: Counter,
    pub unauthorized: Counter,
    pub misconfigured: Counter,
}
struct Registry(prometheus::Registry);

impl Counter {
    fn new(name: &str, opts: Opts) -> Counter {
        let c = prometheus::Counter::with_opts(opts)
            .unwrap_or_else(|e| panic!("unable to create {name} counter: {e}"));
        Counter { inner: c, name: name.to_string() }
    }

    pub fn inc(&self) {
        self.inner.inc()
    }
}

impl ComplexCommandCounters {
    pub fn invoked(&self) {
        self.invoked.inc()
    }

    pub fn finished(&self) {
        self.finished.inc()
    }
}

impl Registry {
    fn register(&self, counter: &Counter) -> &Self {
        self.0.register(Box::new(counter.inner.clone()))
            .unwrap_or_else(|e| panic!("unable to register the {} counter: {e}", counter.name));
        self
    }

    fn unwrap(&self) -> prometheus::Registry {
        self.0.clone()
    }
}
