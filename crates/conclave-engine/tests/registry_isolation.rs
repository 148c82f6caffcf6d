//! Factory scenarios: instance tracking and state isolation

use std::sync::Arc;

use conclave_common::{AccountId, AssetId, InMemoryLedger};
use conclave_engine::{EngineError, EngineRegistry};
use rust_decimal_macros::dec;

fn signers() -> Vec<AccountId> {
    ["a", "b", "c", "d"].iter().map(|s| AccountId::new(*s)).collect()
}

#[test]
fn create_three_instances_and_list_them() {
    let registry = EngineRegistry::new(Arc::new(InMemoryLedger::new()));

    let h1 = registry.create(2, signers()).unwrap();
    let h2 = registry.create(2, signers()).unwrap();
    let h3 = registry.create(2, signers()).unwrap();

    let handles = registry.list();
    assert_eq!(handles.len(), 3);
    assert_eq!(handles, vec![h1, h2, h3]);

    // Each instance tracks its own tx_count, starting at 0
    for handle in handles {
        let engine = registry.get(handle).unwrap();
        assert_eq!(engine.lock().tx_count(), 0);
        assert_eq!(engine.lock().quorum(), 2);
    }
}

#[test]
fn invalid_quorum_propagates_from_engine_construction() {
    let registry = EngineRegistry::new(Arc::new(InMemoryLedger::new()));

    let err = registry.create(0, signers()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidQuorum { quorum: 0, .. }));
    let err = registry.create(5, signers()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidQuorum { quorum: 5, .. }));

    assert_eq!(registry.list().len(), 0);
}

#[test]
fn instances_do_not_share_state() {
    let ledger = Arc::new(InMemoryLedger::new());
    let asset = AssetId::new("web3cxi");
    let registry = EngineRegistry::new(ledger.clone());

    let h1 = registry.create(2, signers()).unwrap();
    let h2 = registry.create(2, signers()).unwrap();
    let a = AccountId::new("a");
    let b = AccountId::new("b");

    // Propose and execute a transfer on the first instance only
    let e1 = registry.get(h1).unwrap();
    {
        let mut engine = e1.lock();
        ledger.mint(&asset, engine.account(), dec!(500));
        let id = engine
            .propose_transfer(&a, dec!(100), b.clone(), asset.clone())
            .unwrap();
        engine.approve_transfer(&a, id).unwrap();
        engine.approve_transfer(&b, id).unwrap();
        assert!(engine.get_transfer(id).unwrap().executed);
        assert_eq!(engine.tx_count(), 1);
    }

    // The second instance saw none of it
    let e2 = registry.get(h2).unwrap();
    let engine = e2.lock();
    assert_eq!(engine.tx_count(), 0);
    assert_eq!(engine.treasury_balance(&asset), dec!(0));
    assert!(matches!(
        engine.get_transfer(conclave_engine::OperationId(1)),
        Err(EngineError::InvalidTxId(_))
    ));
}
