use super::*;

#[test]
fn test_config_derives_supply_from_curve() {
    let config = build_config(&scenario_params());
    assert_eq!(config.curve_point_count, 16);
    assert_eq!(config.swap_base_amount, 1_502_228_804);
    assert_eq!(config.migration_base_threshold, 451_355_242);
    // swap base * 1.25 plus the migration deposit
    assert_eq!(config.initial_base_supply, 1_877_786_005 + 451_355_242);
    assert!(!config.fixed_token_supply);
    assert!(config.migration_sqrt_price > config.sqrt_start_price);
    assert!(config.migration_sqrt_price < config.curve[0].sqrt_price);
}

#[test]
fn test_full_flow_with_sol() {
    let config = build_config(&scenario_params());
    let mut pool = new_pool(&config, 0);
    assert_eq!(pool.phase(&config), PoolPhase::Active);
    assert_eq!(pool.base_reserve, config.initial_base_supply);

    prepare_migration(&mut pool);
    assert_pool_error(pool.migrate(&config, 0), PoolError::ThresholdNotMet);

    let result = pool.swap(&config, &buy(5_500_000_000, 1), 0, 1).unwrap();
    assert_eq!(result.fee_numerator, 2_500_000);
    assert_eq!(result.fee.total, 13_750_000);
    assert_eq!(result.fee.partner, 11_000_000);
    assert_eq!(result.fee.protocol, 2_750_000);
    assert_eq!(result.fee.creator, 0);
    // The buy stops at the migration price; the extra quote stays in the reserve
    assert_eq!(result.output_amount, config.swap_base_amount);
    assert_eq!(pool.sqrt_price, config.migration_sqrt_price);
    assert_eq!(pool.quote_reserve, 5_486_250_000);
    assert_eq!(pool.base_reserve, config.initial_base_supply - 1_502_228_804);
    assert_eq!(pool.curve_segment_index, 0);
    assert_eq!(pool.partner_quote_fee, 11_000_000);
    assert_eq!(pool.protocol_quote_fee, 2_750_000);

    assert_eq!(pool.phase(&config), PoolPhase::ThresholdReached);
    assert_eq!(pool.curve_completed_at, 1);
    assert_pool_error(
        pool.swap(&config, &buy(LAMPORTS_PER_SOL, 2), 0, 2),
        PoolError::PoolMigrated,
    );

    let base_before = pool.base_reserve;
    let outcome = pool.migrate(&config, 100).unwrap();
    assert_eq!(outcome.deposit_quote, 5 * LAMPORTS_PER_SOL);
    assert_eq!(outcome.surplus, 486_250_000);
    // Deposit at the migration price is exactly the reserved base
    assert_eq!(outcome.deposit_base, config.migration_base_threshold);
    assert_eq!(outcome.leftover_base, 375_557_201);
    assert_eq!(outcome.deposit_base + outcome.leftover_base, base_before);
    assert_eq!(outcome.lp_amount, 1_502_257_038);
    assert_eq!(outcome.lp.partner_unlocked, 0);
    assert_eq!(outcome.lp.creator_unlocked, 0);
    assert_eq!(outcome.lp.partner_locked, 1_427_144_186);
    assert_eq!(outcome.lp.creator_locked, 75_112_851);
    assert_eq!(outcome.lp.retained, 1);

    assert_eq!(pool.phase(&config), PoolPhase::Migrated);
    assert_eq!(pool.migrated_at, 100);
    assert_eq!(pool.quote_reserve, 0);
    assert_eq!(pool.base_reserve, 0);

    assert_pool_error(pool.migrate(&config, 101), PoolError::AlreadyMigrated);
    assert_pool_error(
        pool.swap(&config, &buy(LAMPORTS_PER_SOL, 102), 0, 102),
        PoolError::PoolMigrated,
    );
    assert_pool_error(
        pool.swap(&config, &sell(1_000, 102), 0, 102),
        PoolError::PoolMigrated,
    );
}

#[test]
fn test_crossing_buy_stops_at_migration_price() {
    let config = build_config(&scenario_params());
    let mut pool = new_pool(&config, 0);

    let first = pool.swap(&config, &buy(4 * LAMPORTS_PER_SOL, 1), 0, 1).unwrap();
    assert_eq!(first.output_amount, 1_396_051_357);
    assert_eq!(pool.phase(&config), PoolPhase::Active);

    // 1_995_000_000 after fee, 984_999_999 of it past the migration price
    let second = pool.swap(&config, &buy(2 * LAMPORTS_PER_SOL, 2), 0, 2).unwrap();
    assert_eq!(second.output_amount, 106_177_446);
    assert_eq!(second.amount_in, 2 * LAMPORTS_PER_SOL);
    assert_eq!(pool.sqrt_price, config.migration_sqrt_price);
    assert_eq!(pool.quote_reserve, 5_985_000_000);
    assert_eq!(pool.phase(&config), PoolPhase::ThresholdReached);
}

#[test]
fn test_oversized_buy_is_capped_not_out_of_curve() {
    let config = build_config(&scenario_params());
    assert_eq!(config.max_swallow_quote_amount().unwrap(), LAMPORTS_PER_SOL);
    let mut pool = new_pool(&config, 0);

    assert_pool_error(
        pool.swap(&config, &buy(20 * LAMPORTS_PER_SOL, 1), 0, 1),
        PoolError::SwapAmountIsOverThreshold,
    );
    // 1_004_950_000 past the migration price, just over the cap
    assert_pool_error(
        pool.swap(&config, &buy(6_020_000_000, 1), 0, 1),
        PoolError::SwapAmountIsOverThreshold,
    );
    assert_eq!(pool.quote_reserve, 0);
    assert_eq!(pool.total_swaps, 0);

    // 985_000_000 past it fits
    pool.swap(&config, &buy(6 * LAMPORTS_PER_SOL, 1), 0, 1).unwrap();
    assert_eq!(pool.quote_reserve, 5_985_000_000);
    assert_eq!(pool.phase(&config), PoolPhase::ThresholdReached);
}

#[test]
fn test_migration_requires_prepared_accounts() {
    let config = build_config(&scenario_params());
    let mut pool = new_pool(&config, 0);
    pool.swap(&config, &buy(5_500_000_000, 1), 0, 1).unwrap();
    assert_pool_error(pool.migrate(&config, 2), PoolError::MigrationNotPrepared);
    assert_eq!(pool.phase(&config), PoolPhase::ThresholdReached);
}

#[test]
fn test_full_range_migration() {
    let mut params = scenario_params();
    params.migration_option = MigrationOption::AmmV2;
    let config = build_config(&params);
    let pool = migrated_pool(&config);

    assert_eq!(pool.status, PoolStatus::Migrated);
    assert_eq!(pool.migration_surplus, 486_250_000);
    assert!(pool.leftover_base > 0);
}

#[test]
fn test_buy_then_sell_back() {
    let config = build_config(&scenario_params());
    let mut pool = new_pool(&config, 0);

    let bought = pool.swap(&config, &buy(LAMPORTS_PER_SOL, 1), 0, 1).unwrap();
    let sqrt_after_buy = pool.sqrt_price;
    let sold = pool
        .swap(&config, &sell(bought.output_amount, 2), 0, 2)
        .unwrap();

    assert!(sold.output_amount < LAMPORTS_PER_SOL);
    assert!(pool.sqrt_price < sqrt_after_buy);
    assert!(pool.sqrt_price >= config.sqrt_start_price);
    assert_eq!(pool.base_reserve, config.initial_base_supply);
    // Both fees were charged in quote
    assert_eq!(
        pool.partner_quote_fee + pool.protocol_quote_fee,
        bought.fee.total + sold.fee.total
    );
    assert_eq!(pool.partner_base_fee + pool.protocol_base_fee, 0);
}

#[test]
fn test_sell_below_start_price_exceeds_curve() {
    let config = build_config(&scenario_params());
    let mut pool = new_pool(&config, 0);
    pool.swap(&config, &buy(LAMPORTS_PER_SOL, 1), 0, 1).unwrap();
    let base_bought = config.initial_base_supply - pool.base_reserve;

    assert_pool_error(
        pool.swap(&config, &sell(base_bought * 2, 2), 0, 2),
        PoolError::ExceedsCurve,
    );
}

#[test]
fn test_slippage_leaves_pool_untouched() {
    let config = build_config(&scenario_params());
    let mut pool = new_pool(&config, 0);
    let before = pool.clone();

    assert_pool_error(
        pool.swap(&config, &buy(LAMPORTS_PER_SOL, 1), u64::MAX, 1),
        PoolError::SlippageExceeded,
    );
    assert_eq!(pool.quote_reserve, before.quote_reserve);
    assert_eq!(pool.base_reserve, before.base_reserve);
    assert_eq!(pool.sqrt_price, before.sqrt_price);
    assert_eq!(pool.total_swaps, 0);
}

#[test]
fn test_zero_amount_is_rejected() {
    let config = build_config(&scenario_params());
    let mut pool = new_pool(&config, 0);
    assert_pool_error(pool.swap(&config, &buy(0, 1), 0, 1), PoolError::InvalidAmount);
}
