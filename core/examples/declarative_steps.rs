// checkflow/examples/declarative_steps.rs

use checkflow::{Chain, ChainError, CheckFn, CheckResult, ContextData, Predicate, Step};
use tracing_subscriber::EnvFilter;
use tracing::{info, warn};

#[derive(Clone, Debug)]
struct Person {
  name: String,
  age: u32,
}

fn announce(label: &'static str) -> CheckFn<Person> {
  CheckFn::from_sync(move |ctx: ContextData<Person>| {
    let person = ctx.read();
    info!(check = label, name = %person.name, age = person.age, "Check ran.");
    CheckResult::ok()
  })
}

fn something_wrong() -> CheckFn<Person> {
  CheckFn::from_sync(|_ctx: ContextData<Person>| CheckResult::fail(10000, "something wrong"))
}

fn never() -> Option<Predicate<Person>> {
  Some(Predicate::new(|_ctx: ContextData<Person>| false))
}

fn always() -> Option<Predicate<Person>> {
  Some(Predicate::new(|_ctx: ContextData<Person>| true))
}

#[tokio::main]
async fn main() -> Result<(), ChainError> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  info!("--- Declarative Steps Example ---");

  let tom = Person {
    name: "Tom is Tom".to_string(),
    age: 10,
  };

  let chain = Chain::from_steps(
    tom,
    vec![
      Step::Check(vec![announce("f1"), announce("f2")]),
      Step::If {
        predicate: always(),
        checks: vec![announce("f1"), announce("f2")],
      },
      Step::Else(vec![something_wrong(), announce("f4")]),
      Step::If {
        predicate: never(),
        checks: vec![announce("f1"), announce("f2")],
      },
      Step::ElseIf {
        predicate: never(),
        checks: vec![announce("f2"), announce("f5")],
      },
      Step::ElseIf {
        predicate: always(),
        checks: vec![announce("f4"), announce("f5")],
      },
      Step::Check(vec![announce("f1")]),
      Step::Repeat(3, vec![announce("f4")]),
      Step::Parallel(vec![announce("f1"), announce("f2"), announce("f4")]),
      Step::Check(vec![something_wrong()]),
      Step::Check(vec![announce("unreached")]),
    ],
  )?;

  let result = chain.wait().await;
  info!("Final result: {}", result);
  assert_eq!(result.status_code(), 10000);

  // An `ElseIf` must directly follow an `If` or another `ElseIf`.
  let invalid = Chain::from_steps(
    Person {
      name: "Ann".to_string(),
      age: 30,
    },
    vec![
      Step::Check(vec![announce("f1")]),
      Step::ElseIf {
        predicate: always(),
        checks: vec![announce("f2")],
      },
    ],
  );
  match invalid {
    Ok(_) => warn!("Invalid step list was accepted."),
    Err(e) => info!(error = %e, "Invalid step list rejected as expected."),
  }

  Ok(())
}
