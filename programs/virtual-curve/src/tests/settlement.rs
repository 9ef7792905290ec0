use super::*;

#[test]
fn test_surplus_withdrawals_happen_once() {
    let config = build_config(&scenario_params());
    let mut pool = migrated_pool(&config);

    assert_eq!(pool.withdraw_partner_surplus().unwrap(), 389_000_000);
    assert_pool_error(pool.withdraw_partner_surplus(), PoolError::AlreadyClaimed);

    assert_eq!(pool.withdraw_protocol_surplus().unwrap(), 97_250_000);
    assert_pool_error(pool.withdraw_protocol_surplus(), PoolError::AlreadyClaimed);

    assert_eq!(pool.phase(&config), PoolPhase::Migrated);
    assert_eq!(pool.withdraw_leftover().unwrap(), 375_557_201);
    assert_pool_error(pool.withdraw_leftover(), PoolError::AlreadyClaimed);
    assert_eq!(pool.phase(&config), PoolPhase::Settled);
}

#[test]
fn test_withdrawals_before_migration() {
    let config = build_config(&scenario_params());
    let mut pool = new_pool(&config, 0);
    pool.swap(&config, &buy(5_500_000_000, 1), 0, 1).unwrap();

    assert_pool_error(pool.withdraw_partner_surplus(), PoolError::NotMigrated);
    assert_pool_error(pool.withdraw_protocol_surplus(), PoolError::NotMigrated);
    assert_pool_error(pool.withdraw_leftover(), PoolError::NotMigrated);
    assert!(!pool.partner_surplus_claimed);
}

#[test]
fn test_trading_fee_claims_drain_accumulators() {
    let mut params = scenario_params();
    params.creator_trading_fee_percentage = 25;
    let config = build_config(&params);
    let mut pool = new_pool(&config, 0);

    let first = pool.swap(&config, &buy(LAMPORTS_PER_SOL, 1), 0, 1).unwrap();
    assert_eq!(pool.claim_partner_trading_fee(), (0, first.fee.partner));
    assert_eq!(pool.claim_partner_trading_fee(), (0, 0));

    let second = pool.swap(&config, &buy(LAMPORTS_PER_SOL, 2), 0, 2).unwrap();
    assert_eq!(pool.claim_partner_trading_fee(), (0, second.fee.partner));
    assert_eq!(
        pool.claim_creator_trading_fee(),
        (0, first.fee.creator + second.fee.creator)
    );
    assert_eq!(
        pool.claim_protocol_fee(),
        (0, first.fee.protocol + second.fee.protocol)
    );
    assert_eq!(pool.claim_creator_trading_fee(), (0, 0));
    assert_eq!(pool.claim_protocol_fee(), (0, 0));
}

#[test]
fn test_fees_claimable_after_migration() {
    let config = build_config(&scenario_params());
    let mut pool = migrated_pool(&config);
    assert_eq!(pool.claim_partner_trading_fee(), (0, 11_000_000));
    assert_eq!(pool.claim_protocol_fee(), (0, 2_750_000));
}

fn funded_lock(vesting: LockedVestingConfig) -> LpLock {
    let mut lock = LpLock::default();
    lock.initialize(Pubkey::new_unique(), LockRole::Partner, Pubkey::new_unique());
    lock.fund(100, 1_000, vesting, 10_000).unwrap();
    lock
}

#[test]
fn test_lp_lock_release_is_incremental() {
    let mut lock = funded_lock(LockedVestingConfig {
        amount_per_period: 1,
        cliff_duration_from_migration_time: 3_600,
        frequency: 600,
        number_of_period: 4,
        cliff_unlock_amount: 1,
    });

    // Unlocked share is claimable immediately
    assert_eq!(lock.release(10_000).unwrap(), 100);
    assert_eq!(lock.release(10_000).unwrap(), 0);

    // Cliff: 1 of 5 units
    assert_eq!(lock.release(13_600).unwrap(), 200);
    assert_eq!(lock.release(13_600).unwrap(), 0);
    assert_eq!(lock.release(14_199).unwrap(), 0);

    assert_eq!(lock.release(14_800).unwrap(), 400);
    assert_eq!(lock.release(u64::MAX).unwrap(), 400);
    assert_eq!(lock.released_amount, lock.total_amount());
    assert_eq!(lock.release(u64::MAX).unwrap(), 0);
}

#[test]
fn test_permanent_lock_only_releases_unlocked() {
    let mut lock = funded_lock(LockedVestingConfig::default());
    assert_eq!(lock.release(u64::MAX).unwrap(), 100);
    assert_eq!(lock.release(u64::MAX).unwrap(), 0);
    assert_eq!(lock.released_amount, 100);
}

#[test]
fn test_lp_lock_guards() {
    let mut lock = LpLock::default();
    lock.initialize(Pubkey::new_unique(), LockRole::Creator, Pubkey::new_unique());
    assert_pool_error(lock.release(0), PoolError::NotMigrated);

    lock.fund(0, 10, LockedVestingConfig::default(), 0).unwrap();
    assert_pool_error(
        lock.fund(0, 10, LockedVestingConfig::default(), 0),
        PoolError::AlreadyMigrated,
    );
    assert_eq!(LockRole::Creator.seed(), CREATOR_LOCK_SEED);
}

#[test]
fn test_scenario_locks_are_permanent() {
    let config = build_config(&scenario_params());
    let mut pool = new_pool(&config, 0);
    pool.swap(&config, &buy(5_500_000_000, 1), 0, 1).unwrap();
    prepare_migration(&mut pool);
    let outcome = pool.migrate(&config, 100).unwrap();

    let mut partner = LpLock::default();
    partner.initialize(Pubkey::new_unique(), LockRole::Partner, config.fee_claimer);
    partner
        .fund(
            outcome.lp.partner_unlocked,
            outcome.lp.partner_locked,
            config.locked_vesting,
            100,
        )
        .unwrap();
    assert_eq!(partner.locked_amount, 1_427_144_186);
    assert_eq!(partner.release(u64::MAX).unwrap(), 0);
}
