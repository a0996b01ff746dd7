// Licensed under the Apache-2.0 license

//! Serialization of command sequences across threads

use crate::common::{mock_session, sha256, test_constants::*};
use mars_util_host_commands::api::{
    mars_cmd_sequence_complete, mars_cmd_sequence_hash, mars_cmd_sequence_update,
};
use mars_util_host_command_types::MarsCommandCode;
use mars_util_host_osal::{current_id, ThreadBuilder};
use std::sync::Arc;

const THREADS: usize = 8;
const ROUNDS: usize = 10;

#[test]
fn test_locked_sequences_never_interleave() {
    let (session, probe) = mock_session().expect("Failed to create MarsSession");
    let session = Arc::new(session);
    let init_calls = probe.calls();

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let session = Arc::clone(&session);
            ThreadBuilder::new()
                .name(format!("hasher-{}", worker))
                .spawn(move || {
                    let mut digests = Vec::new();
                    for round in 0..ROUNDS {
                        let first = format!("worker {} ", worker);
                        let second = format!("round {}", round);

                        let mut digest = [0u8; DIGEST_LEN];
                        let _guard = session.guard().expect("Failed to lock session");
                        mars_cmd_sequence_hash(&session).expect("SequenceHash failed");
                        mars_cmd_sequence_update(&session, first.as_bytes(), &mut [])
                            .expect("SequenceUpdate failed");
                        std::thread::yield_now();
                        mars_cmd_sequence_update(&session, second.as_bytes(), &mut [])
                            .expect("SequenceUpdate failed");
                        mars_cmd_sequence_complete(&session, &mut digest)
                            .expect("SequenceComplete failed");

                        digests.push((format!("{}{}", first, second), digest));
                    }
                    (current_id(), digests)
                })
                .expect("Failed to spawn worker")
        })
        .collect();

    let mut workers = Vec::new();
    for handle in handles {
        let (id, digests) = handle.join().expect("Worker panicked");
        for (message, digest) in digests {
            assert_eq!(digest, sha256(&[message.as_bytes()]));
        }
        workers.push(id);
    }

    assert_eq!(probe.max_in_flight(), 1);

    // Each locked run shows up as one uninterrupted start/update/update/complete block
    let history = probe.history();
    let runs = &history[init_calls..];
    assert_eq!(runs.len(), THREADS * ROUNDS * 4);

    let expected: Vec<u16> = [
        MarsCommandCode::SequenceHash,
        MarsCommandCode::SequenceUpdate,
        MarsCommandCode::SequenceUpdate,
        MarsCommandCode::SequenceComplete,
    ]
    .into_iter()
    .map(u16::from)
    .collect();

    for block in runs.chunks(4) {
        let owner = block[0].0;
        assert!(workers.contains(&owner));
        assert!(block.iter().all(|(id, _)| *id == owner));
        let opcodes: Vec<u16> = block.iter().map(|(_, op)| *op).collect();
        assert_eq!(opcodes, expected);
    }
}
