//! End-to-end synchronous dispatch through registries, composites, and
//! decorators.

mod support;

use std::sync::Arc;

use commandstack_rust::{
    CommandDispatcher, CommandHandlerProvider, CommandStackError, CommandType, CompositeProvider,
    DefaultDispatcher, DispatcherBuilder, RegistryProvider, RequiredProvider,
};

use support::{Captured, CapturingHandler, CloseAccount, Deposit, RejectingHandler, Withdraw};

#[test]
fn registered_handler_receives_the_exact_command() {
    let captured = Captured::new();
    let registry = RegistryProvider::new();
    let store = Arc::clone(&captured);
    registry
        .register::<Deposit, _, _>(move || Ok(CapturingHandler::new(Arc::clone(&store))))
        .unwrap();

    let dispatcher = DefaultDispatcher::strict(registry);
    dispatcher
        .send(Deposit {
            account_id: "acc-1".into(),
            amount: 100,
        })
        .unwrap();

    assert_eq!(captured.count(), 1);
    assert_eq!(
        captured.commands(),
        vec![Deposit {
            account_id: "acc-1".into(),
            amount: 100,
        }]
    );
}

#[test]
fn only_the_matching_handler_is_invoked() {
    let deposits = Captured::new();
    let withdrawals = Captured::new();

    let registry = RegistryProvider::new();
    let deposit_store = Arc::clone(&deposits);
    let withdraw_store = Arc::clone(&withdrawals);
    registry
        .register::<Deposit, _, _>(move || Ok(CapturingHandler::new(Arc::clone(&deposit_store))))
        .unwrap();
    registry
        .register::<Withdraw, _, _>(move || Ok(CapturingHandler::new(Arc::clone(&withdraw_store))))
        .unwrap();

    let dispatcher = DefaultDispatcher::strict(registry);
    dispatcher
        .send(Deposit {
            account_id: "acc-1".into(),
            amount: 50,
        })
        .unwrap();

    assert_eq!(deposits.count(), 1);
    assert_eq!(withdrawals.count(), 0);
}

#[test]
fn same_type_in_two_composed_registries_is_ambiguous() {
    let captured = Captured::new();

    let build_registry = || {
        let registry = RegistryProvider::new();
        let store = Arc::clone(&captured);
        registry
            .register::<Deposit, _, _>(move || Ok(CapturingHandler::new(Arc::clone(&store))))
            .unwrap();
        Arc::new(registry)
    };

    let composite = CompositeProvider::new(vec![
        build_registry() as Arc<dyn CommandHandlerProvider>,
        build_registry(),
    ])
    .unwrap();
    let dispatcher = DefaultDispatcher::strict(composite);

    let err = dispatcher
        .send(Deposit {
            account_id: "acc-1".into(),
            amount: 100,
        })
        .unwrap_err();

    assert!(matches!(err, CommandStackError::DuplicateHandlerFound(t)
        if t == CommandType::of::<Deposit>()));
    // Ambiguity is detected before any handler runs.
    assert_eq!(captured.count(), 0);
}

#[test]
fn composite_falls_through_to_the_registry_that_has_the_handler() {
    let captured = Captured::new();

    let empty = Arc::new(RegistryProvider::new());

    let populated = RegistryProvider::new();
    let store = Arc::clone(&captured);
    populated
        .register::<Deposit, _, _>(move || Ok(CapturingHandler::new(Arc::clone(&store))))
        .unwrap();

    let composite = CompositeProvider::new(vec![
        empty as Arc<dyn CommandHandlerProvider>,
        Arc::new(populated),
    ])
    .unwrap();
    let dispatcher = DefaultDispatcher::strict(composite);

    dispatcher
        .send(Deposit {
            account_id: "acc-2".into(),
            amount: 10,
        })
        .unwrap();

    assert_eq!(captured.count(), 1);
}

#[test]
fn required_decorator_makes_absence_fatal() {
    let provider = RequiredProvider::new(RegistryProvider::new());
    let dispatcher = DefaultDispatcher::new(provider);

    // The required decorator fires before the dispatcher's lenient fallback
    // can apply.
    let err = dispatcher
        .send(Deposit {
            account_id: "acc-1".into(),
            amount: 1,
        })
        .unwrap_err();
    assert!(matches!(err, CommandStackError::HandlerNotFound(_)));
}

#[test]
fn handler_rejection_reaches_the_caller_verbatim() {
    let registry = RegistryProvider::new();
    registry
        .register::<Withdraw, _, _>(|| {
            Ok(RejectingHandler {
                message: "insufficient funds",
            })
        })
        .unwrap();

    let dispatcher = DefaultDispatcher::strict(registry);
    let err = dispatcher
        .send(Withdraw {
            account_id: "acc-1".into(),
            amount: 1_000_000,
        })
        .unwrap_err();

    match err {
        CommandStackError::Handler(source) => {
            assert_eq!(source.to_string(), "insufficient funds");
        }
        other => panic!("expected Handler error, got {:?}", other),
    }
}

#[test]
fn builder_with_zero_providers_is_harmless() {
    let dispatcher = DispatcherBuilder::new().build().unwrap();

    dispatcher
        .send(Deposit {
            account_id: "acc-1".into(),
            amount: 1,
        })
        .unwrap();
    dispatcher
        .send(CloseAccount {
            account_id: "acc-1".into(),
        })
        .unwrap();
}

#[test]
fn builder_unhandled_listener_sees_the_dropped_command() {
    let unhandled = Captured::new();
    let store = Arc::clone(&unhandled);

    let dispatcher = DispatcherBuilder::new()
        .on_unhandled(move |command| {
            if let Some(deposit) = command.downcast_ref::<Deposit>() {
                store.record(deposit.clone());
            }
        })
        .build()
        .unwrap();

    dispatcher
        .send(Deposit {
            account_id: "acc-9".into(),
            amount: 7,
        })
        .unwrap();

    assert_eq!(
        unhandled.commands(),
        vec![Deposit {
            account_id: "acc-9".into(),
            amount: 7,
        }]
    );
}

#[test]
fn builder_composes_registries_from_separate_bootstrap_phases() {
    let deposits = Captured::new();
    let withdrawals = Captured::new();

    let deposit_store = Arc::clone(&deposits);
    let deposit_registry = RegistryProvider::configure(|registry| {
        registry.register::<Deposit, _, _>(move || {
            Ok(CapturingHandler::new(Arc::clone(&deposit_store)))
        })?;
        Ok(())
    })
    .unwrap();

    let withdraw_store = Arc::clone(&withdrawals);
    let withdraw_registry = RegistryProvider::configure(|registry| {
        registry.register::<Withdraw, _, _>(move || {
            Ok(CapturingHandler::new(Arc::clone(&withdraw_store)))
        })?;
        Ok(())
    })
    .unwrap();

    let dispatcher = DispatcherBuilder::new()
        .provider(Arc::new(deposit_registry))
        .provider(Arc::new(withdraw_registry))
        .strict()
        .build()
        .unwrap();

    dispatcher
        .send(Deposit {
            account_id: "acc-1".into(),
            amount: 30,
        })
        .unwrap();
    dispatcher
        .send(Withdraw {
            account_id: "acc-1".into(),
            amount: 20,
        })
        .unwrap();

    assert_eq!(deposits.count(), 1);
    assert_eq!(withdrawals.count(), 1);
}
