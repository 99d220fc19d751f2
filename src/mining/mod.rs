//! The two mining strategies and the shared "mine one block" primitive.
//!
//! Continuous mining mines unconditionally on a fixed tick, keeping the
//! chain growing even with no sales. Discrete mining sweeps on a shorter
//! interval and mines only when the pool is non-empty, confirming
//! point-of-sale activity without flooding the chain with empty blocks.
//! The strategies are independent toggles; a deployment may run neither,
//! either, or both.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::rt;
use actix_web::rt::task::JoinHandle;
use actix_web::rt::time::{interval, sleep};
use log::{debug, error, info};

use crate::error::Result;
use crate::ledger::{self, Block, Ledger};
use crate::transaction::PendingPool;

/// Tunables for the engine. Defaults mirror the deployed configuration.
#[derive(Debug, Clone)]
pub struct MiningConfig {
    /// Identity credited by reward transactions and stamped on blocks.
    pub validator: String,
    pub reward_amount: f64,
    pub continuous_interval: Duration,
    pub discrete_interval: Duration,
    pub pos_confirm_delay: Duration,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            validator: "pos-node".to_string(),
            reward_amount: ledger::DEFAULT_REWARD,
            continuous_interval: ledger::CONTINUOUS_MINE_INTERVAL,
            discrete_interval: ledger::DISCRETE_SWEEP_INTERVAL,
            pos_confirm_delay: ledger::POS_CONFIRM_DELAY,
        }
    }
}

/// Owns the mining flags and timer tasks. All chain growth goes through
/// `mine_block`, which is the single critical section shared by both
/// strategies and the out-of-band point-of-sale confirmation.
pub struct MiningEngine {
    ledger: Arc<Mutex<Ledger>>,
    pool: Arc<Mutex<PendingPool>>,
    config: MiningConfig,
    continuous_enabled: Arc<AtomicBool>,
    discrete_enabled: Arc<AtomicBool>,
    continuous_task: Mutex<Option<JoinHandle<()>>>,
    discrete_task: Mutex<Option<JoinHandle<()>>>,
}

impl MiningEngine {
    pub fn new(
        ledger: Arc<Mutex<Ledger>>,
        pool: Arc<Mutex<PendingPool>>,
        config: MiningConfig,
    ) -> Self {
        Self {
            ledger,
            pool,
            config,
            continuous_enabled: Arc::new(AtomicBool::new(false)),
            discrete_enabled: Arc::new(AtomicBool::new(false)),
            continuous_task: Mutex::new(None),
            discrete_task: Mutex::new(None),
        }
    }

    pub fn is_mining(&self) -> bool {
        self.continuous_enabled.load(Ordering::SeqCst)
    }

    pub fn is_discrete_mining(&self) -> bool {
        self.discrete_enabled.load(Ordering::SeqCst)
    }

    pub fn validator(&self) -> &str {
        &self.config.validator
    }

    /// Mine one block: drain the pool (leaving the standing reward for the
    /// next round) and append the snapshot to the chain.
    ///
    /// The ledger lock is held across the whole sequence, so concurrent
    /// triggers (continuous tick, discrete sweep, POS confirmation)
    /// serialize here, and a `submit` racing with the drain lands either
    /// in this block's snapshot or in the pool for the next one.
    pub fn mine_block(&self) -> Result<Block> {
        Self::mine_once(
            &self.ledger,
            &self.pool,
            &self.config.validator,
            self.config.reward_amount,
        )
    }

    fn mine_once(
        ledger: &Mutex<Ledger>,
        pool: &Mutex<PendingPool>,
        validator: &str,
        reward_amount: f64,
    ) -> Result<Block> {
        let mut ledger = ledger.lock().expect("mutex poisoned");
        let snapshot = {
            let mut pool = pool.lock().expect("mutex poisoned");
            pool.drain_and_reward(validator, reward_amount)
        };
        let block = ledger.append_block(snapshot)?;
        info!(
            "MINER - sealed block #{} ({} txs, hash={})",
            block.index,
            block.transactions.len(),
            block.hash
        );
        Ok(block.clone())
    }

    /// Enable continuous mining: one block per tick, pool contents or not.
    /// No-op if already running.
    pub fn start_continuous(&self) {
        if self.continuous_enabled.swap(true, Ordering::SeqCst) {
            return;
        }

        let ledger = Arc::clone(&self.ledger);
        let pool = Arc::clone(&self.pool);
        let enabled = Arc::clone(&self.continuous_enabled);
        let validator = self.config.validator.clone();
        let reward_amount = self.config.reward_amount;
        let tick = self.config.continuous_interval;

        let handle = rt::spawn(async move {
            let mut ticker = interval(tick);
            ticker.tick().await; // first tick completes immediately
            loop {
                ticker.tick().await;
                if !enabled.load(Ordering::SeqCst) {
                    break;
                }
                match Self::mine_once(&ledger, &pool, &validator, reward_amount) {
                    Ok(block) => debug!("MINER - continuous tick sealed block #{}", block.index),
                    Err(err) => {
                        error!("MINER - halting continuous mining: {err}");
                        enabled.store(false, Ordering::SeqCst);
                        break;
                    }
                }
            }
        });
        *self.continuous_task.lock().expect("mutex poisoned") = Some(handle);
        info!("MINER - continuous mining started");
    }

    /// Disable continuous mining and cancel its timer. Idempotent; an
    /// in-flight mine holding the ledger lock completes normally.
    pub fn stop_continuous(&self) {
        self.continuous_enabled.store(false, Ordering::SeqCst);
        if let Some(handle) = self.continuous_task.lock().expect("mutex poisoned").take() {
            handle.abort();
            info!("MINER - continuous mining stopped");
        }
    }

    /// Enable the discrete sweep: mine only when the pool is non-empty.
    /// No-op if already running.
    pub fn start_discrete(&self) {
        if self.discrete_enabled.swap(true, Ordering::SeqCst) {
            return;
        }

        let ledger = Arc::clone(&self.ledger);
        let pool = Arc::clone(&self.pool);
        let enabled = Arc::clone(&self.discrete_enabled);
        let validator = self.config.validator.clone();
        let reward_amount = self.config.reward_amount;
        let tick = self.config.discrete_interval;

        let handle = rt::spawn(async move {
            let mut ticker = interval(tick);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !enabled.load(Ordering::SeqCst) {
                    break;
                }
                let has_pending = {
                    let pool = pool.lock().expect("mutex poisoned");
                    !pool.is_empty()
                };
                if !has_pending {
                    continue;
                }
                match Self::mine_once(&ledger, &pool, &validator, reward_amount) {
                    Ok(block) => debug!("MINER - discrete sweep sealed block #{}", block.index),
                    Err(err) => {
                        error!("MINER - halting discrete mining: {err}");
                        enabled.store(false, Ordering::SeqCst);
                        break;
                    }
                }
            }
        });
        *self.discrete_task.lock().expect("mutex poisoned") = Some(handle);
        info!("MINER - discrete mining started");
    }

    /// Mirror of `stop_continuous` for the discrete sweep. Idempotent.
    pub fn stop_discrete(&self) {
        self.discrete_enabled.store(false, Ordering::SeqCst);
        if let Some(handle) = self.discrete_task.lock().expect("mutex poisoned").take() {
            handle.abort();
            info!("MINER - discrete mining stopped");
        }
    }

    /// Out-of-band confirmation for a freshly queued point-of-sale
    /// transaction. Fires once after a short delay when discrete mining is
    /// enabled. Latency optimization only: the next sweep would mine the
    /// transaction regardless, so the task is fire-and-forget.
    pub fn schedule_pos_confirmation(&self) {
        if !self.is_discrete_mining() {
            return;
        }

        let ledger = Arc::clone(&self.ledger);
        let pool = Arc::clone(&self.pool);
        let enabled = Arc::clone(&self.discrete_enabled);
        let validator = self.config.validator.clone();
        let reward_amount = self.config.reward_amount;
        let delay = self.config.pos_confirm_delay;

        rt::spawn(async move {
            sleep(delay).await;
            if !enabled.load(Ordering::SeqCst) {
                return;
            }
            let has_pending = {
                let pool = pool.lock().expect("mutex poisoned");
                !pool.is_empty()
            };
            if !has_pending {
                return;
            }
            if let Err(err) = Self::mine_once(&ledger, &pool, &validator, reward_amount) {
                error!("MINER - POS confirmation mine failed: {err}");
            }
        });
    }

    /// Service stop: clear both flags and cancel all timers.
    pub fn shutdown(&self) {
        self.stop_continuous();
        self.stop_discrete();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use actix_web::rt::time::sleep;

    use super::{MiningConfig, MiningEngine};
    use crate::ledger::Ledger;
    use crate::transaction::{PendingPool, Transaction};
    use crate::wallet::balance_of;

    fn engine_with(config: MiningConfig) -> MiningEngine {
        let ledger = Arc::new(Mutex::new(Ledger::new(&config.validator, 1)));
        let pool = Arc::new(Mutex::new(PendingPool::new()));
        MiningEngine::new(ledger, pool, config)
    }

    fn engine() -> MiningEngine {
        engine_with(MiningConfig::default())
    }

    fn chain_len(engine: &MiningEngine) -> usize {
        engine.ledger.lock().unwrap().len()
    }

    fn occurrences(engine: &MiningEngine, tx_id: &str) -> usize {
        let ledger = engine.ledger.lock().unwrap();
        ledger
            .chain
            .iter()
            .flat_map(|b| &b.transactions)
            .filter(|t| t.id == tx_id)
            .count()
    }

    #[test]
    fn mining_credit_reaches_balance() {
        // Scenario B: a credit of 100 to alice, mined into block 1.
        let engine = engine();
        engine
            .pool
            .lock()
            .unwrap()
            .submit_unchecked(Transaction::reward("alice", 100.0));

        let block = engine.mine_block().expect("mine");
        assert_eq!(block.index, 1);
        assert_eq!(chain_len(&engine), 2);

        let ledger = engine.ledger.lock().unwrap();
        assert_eq!(balance_of(&ledger, "alice"), 100.0);
    }

    #[test]
    fn second_block_carries_exactly_one_standing_reward() {
        // Scenario C.
        let engine = engine();
        {
            let mut pool = engine.pool.lock().unwrap();
            for i in 0..3 {
                pool.submit(Transaction::transfer("alice", "bob", 1.0 + i as f64))
                    .unwrap();
            }
        }
        let first = engine.mine_block().unwrap();
        assert_eq!(first.transactions.len(), 3);
        assert!(first.transactions.iter().all(|t| !t.is_reward()));

        {
            let mut pool = engine.pool.lock().unwrap();
            pool.submit(Transaction::transfer("bob", "carol", 1.0))
                .unwrap();
            pool.submit(Transaction::transfer("carol", "dave", 2.0))
                .unwrap();
        }
        let second = engine.mine_block().unwrap();
        assert_eq!(second.transactions.len(), 3);
        let rewards = second
            .transactions
            .iter()
            .filter(|t| t.is_reward())
            .count();
        assert_eq!(rewards, 1);
        assert_eq!(chain_len(&engine), 3);
    }

    #[test]
    fn submitted_transaction_is_included_exactly_once() {
        let engine = engine();
        let tx = Transaction::transfer("alice", "bob", 7.0);
        let tx_id = tx.id.clone();
        engine.pool.lock().unwrap().submit(tx).unwrap();

        engine.mine_block().unwrap();
        engine.mine_block().unwrap();
        assert_eq!(occurrences(&engine, &tx_id), 1);
    }

    #[test]
    fn chain_stays_valid_across_mines() {
        let engine = engine();
        for _ in 0..4 {
            engine.mine_block().unwrap();
        }
        assert!(engine.ledger.lock().unwrap().is_valid_chain());
    }

    #[actix_web::test]
    async fn continuous_mining_grows_the_chain_unconditionally() {
        let engine = engine_with(MiningConfig {
            continuous_interval: Duration::from_millis(20),
            ..MiningConfig::default()
        });
        engine.start_continuous();
        assert!(engine.is_mining());

        sleep(Duration::from_millis(110)).await;
        engine.stop_continuous();

        // No submissions at all, yet the chain grew past genesis.
        assert!(chain_len(&engine) > 1);
        assert!(!engine.is_mining());
    }

    #[actix_web::test]
    async fn discrete_sweep_skips_empty_pool_and_mines_submissions() {
        // Scenario D.
        let engine = engine_with(MiningConfig {
            discrete_interval: Duration::from_millis(20),
            ..MiningConfig::default()
        });
        engine.start_discrete();

        sleep(Duration::from_millis(90)).await;
        // Several sweeps elapsed with nothing pending: no growth.
        assert_eq!(chain_len(&engine), 1);

        let tx = Transaction::transfer("alice", "bob", 9.0);
        let tx_id = tx.id.clone();
        engine.pool.lock().unwrap().submit(tx).unwrap();

        sleep(Duration::from_millis(90)).await;
        engine.stop_discrete();

        assert!(chain_len(&engine) >= 2);
        assert_eq!(occurrences(&engine, &tx_id), 1);
    }

    #[actix_web::test]
    async fn pos_confirmation_mines_ahead_of_the_sweep() {
        let engine = engine_with(MiningConfig {
            // Sweep far in the future; only the confirmation can mine.
            discrete_interval: Duration::from_secs(60),
            pos_confirm_delay: Duration::from_millis(20),
            ..MiningConfig::default()
        });
        engine.start_discrete();

        engine
            .pool
            .lock()
            .unwrap()
            .submit_unchecked(Transaction::sale("sale-1", "shop", 25.0, None));
        engine.schedule_pos_confirmation();

        sleep(Duration::from_millis(100)).await;
        engine.stop_discrete();

        assert_eq!(chain_len(&engine), 2);
    }

    #[actix_web::test]
    async fn stop_is_idempotent_for_both_strategies() {
        let engine = engine();
        engine.start_continuous();
        engine.stop_continuous();
        engine.stop_continuous();
        assert!(!engine.is_mining());

        engine.start_discrete();
        engine.stop_discrete();
        engine.stop_discrete();
        assert!(!engine.is_discrete_mining());
    }

    #[actix_web::test]
    async fn both_strategies_may_run_simultaneously() {
        let engine = engine();
        engine.start_continuous();
        engine.start_discrete();
        assert!(engine.is_mining());
        assert!(engine.is_discrete_mining());

        engine.shutdown();
        assert!(!engine.is_mining());
        assert!(!engine.is_discrete_mining());
    }

    #[actix_web::test]
    async fn start_is_a_noop_when_already_running() {
        let engine = engine();
        engine.start_continuous();
        engine.start_continuous(); // must not spawn a second looper
        assert!(engine.is_mining());
        engine.shutdown();
    }
}
