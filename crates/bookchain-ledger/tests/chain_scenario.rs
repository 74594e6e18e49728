use std::collections::HashSet;
use std::thread;

use bookchain_ledger::{
    Block, Chain, ChainAuditor, ChainError, ChainReader, ChainWriter, LinkageViolation,
};
use bookchain_types::CheckoutEvent;

fn alice() -> CheckoutEvent {
    CheckoutEvent::new("b1", "alice", "2024-01-01")
}

#[test]
fn checkout_scenario() {
    let chain = Chain::new();

    let blocks = chain.read().unwrap();
    assert_eq!(blocks.len(), 1);
    let genesis = blocks[0].clone();
    assert_eq!(genesis.position(), 0);
    assert!(genesis.payload().is_genesis);

    let appended = chain.append(alice()).unwrap();
    assert_eq!(chain.block_count().unwrap(), 2);
    assert_eq!(appended.position(), 1);
    assert_eq!(appended.prev_hash(), genesis.hash());

    // A writer that still believes genesis is the tail.
    let stale = Block::new(CheckoutEvent::new("b2", "bob", "2024-01-02"), &genesis);
    let error = chain.extend(stale).unwrap_err();
    assert!(matches!(
        error,
        ChainError::Rejected(LinkageViolation::PrevHashMismatch { .. })
    ));
    assert_eq!(chain.block_count().unwrap(), 2);
    assert!(ChainAuditor::audit(&chain).unwrap().is_valid());
}

#[test]
fn every_block_links_to_its_predecessor() {
    let chain = Chain::new();
    for i in 0..20 {
        let before = chain.tail().unwrap();
        let block = chain
            .append(CheckoutEvent::new(format!("b{i}"), "carol", "2024-02-01"))
            .unwrap();
        assert_eq!(block.position(), before.position() + 1);
    }

    let blocks = chain.read().unwrap();
    assert!(blocks[0].is_genesis());
    assert!(blocks.iter().all(|b| b.verify_hash(b.hash())));
    for pair in blocks.windows(2) {
        assert_eq!(pair[1].prev_hash(), pair[0].hash());
    }
}

#[test]
fn forged_block_from_json_is_rejected() {
    let chain = Chain::new();
    let honest = Block::new(alice(), &chain.tail().unwrap());

    let mut value = serde_json::to_value(&honest).unwrap();
    value["payload"]["user"] = "mallory".into();
    let forged: Block = serde_json::from_value(value).unwrap();

    assert!(!forged.verify_hash(honest.hash()));
    assert_eq!(
        chain.extend(forged).unwrap_err(),
        ChainError::Rejected(LinkageViolation::HashMismatch { position: 1 })
    );
    assert_eq!(chain.extend(honest).unwrap().position(), 1);
}

#[test]
fn concurrent_appends_form_one_linear_chain() {
    const WRITERS: usize = 8;
    const PER_WRITER: usize = 25;

    let chain = Chain::new();
    thread::scope(|scope| {
        for w in 0..WRITERS {
            let chain = &chain;
            scope.spawn(move || {
                for i in 0..PER_WRITER {
                    let event =
                        CheckoutEvent::new(format!("b{w}-{i}"), format!("user{w}"), "2024-03-01");
                    chain.append(event).unwrap();
                }
            });
        }
    });

    let blocks = chain.read().unwrap();
    assert_eq!(blocks.len(), WRITERS * PER_WRITER + 1);

    let positions: HashSet<u64> = blocks.iter().map(Block::position).collect();
    assert_eq!(positions.len(), blocks.len());

    let report = ChainAuditor::audit(&chain).unwrap();
    assert!(report.is_valid(), "{:?}", report.violations);
}
