// checkflow/examples/signup_checks.rs

use async_trait::async_trait;
use checkflow::{Chain, Check, CheckFn, CheckResult, ContextData};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing::info;

// 1. The context every check in the chain looks at.
#[derive(Clone, Debug, Default)]
struct Signup {
  name: String,
  age: u32,
  country: String,
  invited: bool,
}

// 2. A check can be a struct implementing `Check`...
struct MinimumAge(u32);

#[async_trait]
impl Check<Signup> for MinimumAge {
  async fn check(&self, ctx: ContextData<Signup>) -> CheckResult {
    let age = ctx.read().age;
    if age >= self.0 {
      CheckResult::ok()
    } else {
      CheckResult::fail(10000, format!("must be at least {}, got {}", self.0, age))
    }
  }
}

// 3. ...or a closure.
fn name_present() -> CheckFn<Signup> {
  CheckFn::from_sync(|ctx: ContextData<Signup>| {
    if ctx.read().name.trim().is_empty() {
      CheckResult::fail(10002, "name is empty")
    } else {
      CheckResult::ok()
    }
  })
}

// Simulates a remote lookup.
fn not_blocklisted() -> CheckFn<Signup> {
  CheckFn::new(|ctx: ContextData<Signup>| async move {
    tokio::time::sleep(Duration::from_millis(20)).await;
    let name = ctx.read().name.clone();
    info!(%name, "Blocklist lookup done.");
    CheckResult::ok()
  })
}

fn email_domain_allowed() -> CheckFn<Signup> {
  CheckFn::new(|_ctx: ContextData<Signup>| async move {
    tokio::time::sleep(Duration::from_millis(10)).await;
    CheckResult::ok()
  })
}

fn log_check(label: &'static str) -> CheckFn<Signup> {
  CheckFn::from_sync(move |ctx: ContextData<Signup>| {
    info!(check = label, signup = ?*ctx.read(), "Running check.");
    CheckResult::ok()
  })
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  info!("--- Signup Checks Example ---");

  let signup = Signup {
    name: "Tom".to_string(),
    age: 17,
    country: "NZ".to_string(),
    invited: true,
  };

  let result = Chain::<Signup>::new(signup)
    .check([name_present(), CheckFn::from_check(MinimumAge(13))])
    .note("basic fields")
    .parallel([not_blocklisted(), email_domain_allowed()])
    .note("remote lookups")
    .when(|ctx: ContextData<Signup>| ctx.read().invited, [log_check("invited")])
    .or_when(
      |ctx: ContextData<Signup>| ctx.read().country == "US",
      [CheckFn::from_check(MinimumAge(18))],
    )
    .otherwise([CheckFn::from_check(MinimumAge(16))])
    .repeat(2, [log_check("audit")])
    .note("audit trail")
    .before_each(|note, _ctx| info!(node = note, "Node starting."))
    .after_each(|note, _ctx, result| info!(node = note, %result, "Node finished."))
    .on_success(|ctx, _result| info!(name = %ctx.read().name, "Signup accepted."))
    .on_failure(|_ctx, result| info!(%result, "Signup rejected."))
    .wait()
    .await;

  info!("Final result: {}", result);
  assert!(result.is_success());
}
