use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use once_cell::sync::Lazy;
use prometheus::{Encoder, Opts, TextEncoder};

/// Register additional metrics of our own structs by using this registry instance.
static REGISTRY: Lazy<Registry> = Lazy::new(|| Registry(prometheus::Registry::new()));

// Export special preconstructed counters for Teloxide's handlers.
pub static CMD_START_COUNTER: Lazy<Counter> = Lazy::new(|| {
    Counter::new("command_start", Opts::new("command_start_usage_total", "count of /start invocations"))
});
pub static CMD_HELP_COUNTER: Lazy<Counter> = Lazy::new(|| {
    Counter::new("command_help", Opts::new("command_help_usage_total", "count of /help invocations"))
});
pub static CMD_SET_NOTICE: Lazy<ComplexCommandCounters> = Lazy::new(|| {
    let opts = Opts::new("command_setnotice_usage_total", "count of /setnotice invocations and successes");
    ComplexCommandCounters {
        invoked: Counter::new("command_setnotice (invoked)", opts.clone().const_label("state", "invoked")),
        finished: Counter::new("command_setnotice (finished)", opts.const_label("state", "finished")),
    }
});
pub static CMD_CLEAR_NOTICE: Lazy<ComplexCommandCounters> = Lazy::new(|| {
    let opts = Opts::new("command_clearnotice_usage_total", "count of /clearnotice invocations and successes");
    ComplexCommandCounters {
        invoked: Counter::new("command_clearnotice (invoked)", opts.clone().const_label("state", "invoked")),
        finished: Counter::new("command_clearnotice (finished)", opts.const_label("state", "finished")),
    }
});
pub static RELOCATIONS: Lazy<RelocationCounters> = Lazy::new(|| {
    let opts = Opts::new("relocations_total", "count of notice relocations by outcome");
    RelocationCounters {
        relocated: Counter::new("relocations (relocated)", opts.clone().const_label("outcome", "relocated")),
        dropped: Counter::new("relocations (dropped)", opts.const_label("outcome", "dropped")),
    }
});
pub static GATEWAY_FAILURES: Lazy<GatewayFailureCounters> = Lazy::new(|| {
    let opts = Opts::new("gateway_failures_total", "count of failed requests to the Bot API by operation");
    GatewayFailureCounters {
        send: Counter::new("gateway failures (send)", opts.clone().const_label("operation", "send")),
        delete: Counter::new("gateway failures (delete)", opts.const_label("operation", "delete")),
    }
});


pub fn init() -> axum::Router {
    let prometheus = REGISTRY
        .register(&CMD_START_COUNTER)
        .register(&CMD_HELP_COUNTER)
        .register(&CMD_SET_NOTICE.invoked)
        .register(&CMD_SET_NOTICE.finished)
        .register(&CMD_CLEAR_NOTICE.invoked)
        .register(&CMD_CLEAR_NOTICE.finished)
        .register(&RELOCATIONS.relocated)
        .register(&RELOCATIONS.dropped)
        .register(&GATEWAY_FAILURES.send)
        .register(&GATEWAY_FAILURES.delete)
        .unwrap();

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
    axum::Router::new()
        .route("/metrics", get(|| async move {
            let mut buffer = vec![];
            let metrics = prometheus.gather();
            if let Err(e) = TextEncoder::new().encode(&metrics, &mut buffer) {
                log::error!("couldn't encode the metrics: {e}");
            }
            let custom_metrics = String::from_utf8_lossy(&buffer);

            metric_handle.render() + custom_metrics.as_ref()
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
pub struct RelocationCounters {
    pub relocated: Counter,
    pub dropped: Counter,
}
pub struct GatewayFailureCounters {
    pub send: Counter,
    pub delete: Counter,
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
