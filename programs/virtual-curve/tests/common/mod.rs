//! Shared harness for instruction tests: a `ProgramTest` running the program
//! natively, with config, pool and token accounts written straight into the
//! test bank.
#![allow(dead_code)]

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::solana_program::program_option::COption;
use anchor_lang::solana_program::program_pack::Pack;
use anchor_lang::{AccountSerialize, Discriminator, InstructionData, ToAccountMetas};
use anchor_spl::token::spl_token;
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::account::Account;
use solana_sdk::instruction::InstructionError;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::{Transaction, TransactionError};

use virtual_curve::constants::{MAX_SQRT_PRICE, MIN_SQRT_PRICE};
use virtual_curve::error::PoolError;
use virtual_curve::logic::SwapParams;
use virtual_curve::state::*;
use virtual_curve::utils::*;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
pub const SYMBOL: &str = "CURVE";

/// Anchor's `entry` wants the account slice to live as long as the accounts
/// themselves; the native runner only lends it for the call.
fn process_instruction<'info>(
    program_id: &Pubkey,
    accounts: &[AccountInfo<'info>],
    data: &[u8],
) -> anchor_lang::solana_program::entrypoint::ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    virtual_curve::entry(program_id, accounts, data)
}

pub fn program_test() -> ProgramTest {
    ProgramTest::new(
        "virtual_curve",
        virtual_curve::ID,
        processor!(process_instruction),
    )
}

/// 16 points in 5% steps of the max sqrt price, 0.25% flat fee, 5 SOL
/// threshold, locked LP split 95/5 between partner and creator.
pub fn curve_params() -> ConfigParameters {
    let curve = (1..=16u32)
        .map(|i| CurvePoint {
            sqrt_price: if i == 16 {
                MAX_SQRT_PRICE
            } else {
                MAX_SQRT_PRICE * u128::from(i * 5) / 100
            },
            liquidity: (u64::MAX as u128) << (30 + i),
        })
        .collect();

    ConfigParameters {
        base_fee: BaseFeeConfig {
            cliff_fee_numerator: 2_500_000,
            ..Default::default()
        },
        token_decimal: 6,
        partner_locked_lp_percentage: 95,
        creator_locked_lp_percentage: 5,
        migration_quote_threshold: 5 * LAMPORTS_PER_SOL,
        sqrt_start_price: MIN_SQRT_PRICE << 32,
        curve,
        ..Default::default()
    }
}

/// Addresses and signers of one launched pool
pub struct PoolFixture {
    pub config_key: Pubkey,
    pub config: PoolConfig,
    pub pool_key: Pubkey,
    pub pool: VirtualPool,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub vault_authority: Pubkey,
    pub creator: Keypair,
    pub fee_claimer: Keypair,
    pub leftover_receiver: Keypair,
}

impl PoolFixture {
    /// Pool as `initialize_pool` leaves it
    pub fn launched() -> Self {
        let creator = Keypair::new();
        let fee_claimer = Keypair::new();
        let leftover_receiver = Keypair::new();
        let quote_mint = Pubkey::new_unique();
        let config_key = Pubkey::new_unique();
        let config = curve_params()
            .build(quote_mint, fee_claimer.pubkey(), leftover_receiver.pubkey())
            .unwrap();

        let program_id = virtual_curve::ID;
        let (base_mint, _) = derive_base_mint(&config_key, &creator.pubkey(), SYMBOL, &program_id);
        let (pool_key, _) = derive_pool(&config_key, &base_mint, &quote_mint, &program_id);
        let (base_vault, _) = derive_token_vault(&base_mint, &pool_key, &program_id);
        let (quote_vault, _) = derive_token_vault(&quote_mint, &pool_key, &program_id);
        let (vault_authority, _) = derive_vault_authority(&program_id);

        let mut pool = VirtualPool::default();
        pool.initialize(
            config_key,
            &config,
            creator.pubkey(),
            base_mint,
            base_vault,
            quote_vault,
            0,
        );

        Self {
            config_key,
            config,
            pool_key,
            pool,
            base_mint,
            quote_mint,
            base_vault,
            quote_vault,
            vault_authority,
            creator,
            fee_claimer,
            leftover_receiver,
        }
    }

    /// Pool that crossed the threshold with a single 5.5 SOL buy
    pub fn threshold_reached() -> Self {
        let mut fixture = Self::launched();
        let params = SwapParams {
            amount_in: 5_500_000_000,
            direction: TradeDirection::QuoteToBase,
            has_referral: false,
            current_point: 0,
        };
        fixture.pool.swap(&fixture.config, &params, 0, 0).unwrap();
        assert_eq!(fixture.pool.phase(&fixture.config), PoolPhase::ThresholdReached);
        fixture
    }

    /// Migrated pool; its deposits already left the vaults
    pub fn migrated() -> Self {
        let mut fixture = Self::threshold_reached();
        fixture.pool.lp_mint = derive_lp_mint(&fixture.pool_key, &virtual_curve::ID).0;
        fixture.pool.migrate(&fixture.config, 1).unwrap();
        fixture
    }

    /// Vault balances backing the pool's reserves, unclaimed fees and, once
    /// migrated, the surplus and leftover
    pub fn vault_balances(&self) -> (u64, u64) {
        let pool = &self.pool;
        let base = pool.base_reserve
            + pool.leftover_base
            + pool.protocol_base_fee
            + pool.partner_base_fee
            + pool.creator_base_fee;
        let quote = pool.quote_reserve
            + pool.migration_surplus
            + pool.protocol_quote_fee
            + pool.partner_quote_fee
            + pool.creator_quote_fee;
        (base, quote)
    }

    /// Write the config and its quote mint into the bank
    pub fn install_config(&self, program_test: &mut ProgramTest) {
        add_anchor_account(
            program_test,
            self.config_key,
            &self.config,
            8 + PoolConfig::INIT_SPACE,
        );
        add_mint(
            program_test,
            self.quote_mint,
            Some(Pubkey::new_unique()),
            u64::MAX / 2,
            9,
        );
    }

    /// Write config, pool, both mints and both vaults into the bank
    pub fn install(&self, program_test: &mut ProgramTest) {
        let (base_balance, quote_balance) = self.vault_balances();
        self.install_config(program_test);
        add_anchor_account(
            program_test,
            self.pool_key,
            &self.pool,
            8 + VirtualPool::INIT_SPACE,
        );
        add_mint(
            program_test,
            self.base_mint,
            None,
            self.config.initial_base_supply,
            self.config.token_decimal,
        );
        add_token_account(
            program_test,
            self.base_vault,
            self.base_mint,
            self.vault_authority,
            base_balance,
        );
        add_token_account(
            program_test,
            self.quote_vault,
            self.quote_mint,
            self.vault_authority,
            quote_balance,
        );
    }
}

pub fn add_anchor_account<T: AccountSerialize + Discriminator>(
    program_test: &mut ProgramTest,
    address: Pubkey,
    state: &T,
    space: usize,
) {
    let mut data = Vec::with_capacity(space);
    state.try_serialize(&mut data).unwrap();
    assert!(data.len() <= space, "serialized account exceeds its space");
    data.resize(space, 0);
    add_raw_account(program_test, address, data, virtual_curve::ID);
}

pub fn add_mint(
    program_test: &mut ProgramTest,
    address: Pubkey,
    mint_authority: Option<Pubkey>,
    supply: u64,
    decimals: u8,
) {
    let mint = spl_token::state::Mint {
        mint_authority: mint_authority.map_or(COption::None, COption::Some),
        supply,
        decimals,
        is_initialized: true,
        freeze_authority: COption::None,
    };
    let mut data = vec![0; spl_token::state::Mint::LEN];
    spl_token::state::Mint::pack(mint, &mut data).unwrap();
    add_raw_account(program_test, address, data, spl_token::ID);
}

pub fn add_token_account(
    program_test: &mut ProgramTest,
    address: Pubkey,
    mint: Pubkey,
    owner: Pubkey,
    amount: u64,
) {
    let account = spl_token::state::Account {
        mint,
        owner,
        amount,
        delegate: COption::None,
        state: spl_token::state::AccountState::Initialized,
        is_native: COption::None,
        delegated_amount: 0,
        close_authority: COption::None,
    };
    let mut data = vec![0; spl_token::state::Account::LEN];
    spl_token::state::Account::pack(account, &mut data).unwrap();
    add_raw_account(program_test, address, data, spl_token::ID);
}

pub fn add_raw_account(program_test: &mut ProgramTest, address: Pubkey, data: Vec<u8>, owner: Pubkey) {
    program_test.add_account(
        address,
        Account {
            lamports: Rent::default().minimum_balance(data.len()),
            data,
            owner,
            executable: false,
            rent_epoch: 0,
        },
    );
}

/// Token account with a fresh address
pub fn new_token_account(
    program_test: &mut ProgramTest,
    mint: Pubkey,
    owner: Pubkey,
    amount: u64,
) -> Pubkey {
    let address = Pubkey::new_unique();
    add_token_account(program_test, address, mint, owner, amount);
    address
}

pub fn instruction(accounts: impl ToAccountMetas, data: impl InstructionData) -> Instruction {
    Instruction {
        program_id: virtual_curve::ID,
        accounts: accounts.to_account_metas(None),
        data: data.data(),
    }
}

/// Sign with the context payer plus `signers` on a fresh blockhash, so an
/// identical instruction can be sent again
pub async fn process(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> std::result::Result<(), BanksClientError> {
    let blockhash = context.get_new_latest_blockhash().await.unwrap();
    let mut all_signers: Vec<&Keypair> = vec![&context.payer];
    all_signers.extend_from_slice(signers);
    let transaction = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        &all_signers,
        blockhash,
    );
    context.banks_client.process_transaction(transaction).await
}

pub async fn fund(context: &mut ProgramTestContext, to: &Pubkey) {
    let ix = anchor_lang::solana_program::system_instruction::transfer(
        &context.payer.pubkey(),
        to,
        LAMPORTS_PER_SOL,
    );
    process(context, &[ix], &[]).await.unwrap();
}

pub async fn token_balance(context: &mut ProgramTestContext, address: Pubkey) -> u64 {
    let account = context
        .banks_client
        .get_account(address)
        .await
        .unwrap()
        .expect("token account exists");
    spl_token::state::Account::unpack(&account.data).unwrap().amount
}

pub async fn fetch<T: AccountDeserialize>(context: &mut ProgramTestContext, address: Pubkey) -> T {
    let account = context
        .banks_client
        .get_account(address)
        .await
        .unwrap()
        .expect("account exists");
    T::try_deserialize(&mut account.data.as_slice()).unwrap()
}

/// Custom error code of the first instruction in a failed transaction
pub fn error_code(result: std::result::Result<(), BanksClientError>) -> u32 {
    match result.expect_err("transaction should fail").unwrap() {
        TransactionError::InstructionError(0, InstructionError::Custom(code)) => code,
        other => panic!("unexpected transaction error: {:?}", other),
    }
}

pub fn pool_error(error: PoolError) -> u32 {
    error as u32 + anchor_lang::error::ERROR_CODE_OFFSET
}

pub fn anchor_error(error: anchor_lang::error::ErrorCode) -> u32 {
    error as u32
}
