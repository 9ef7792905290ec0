use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::VAULT_AUTHORITY_SEED;
use crate::error::PoolError;
use crate::events::{CurveCompleted, SwapExecuted};
use crate::logic::SwapParams;
use crate::state::{PoolConfig, PoolPhase, TradeDirection, VirtualPool};
use crate::utils::{current_point, current_timestamp, transfer_from_user_to_vault, transfer_from_vault};
use crate::vault_authority_seeds;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct SwapParameters {
    pub amount_in: u64,
    pub minimum_amount_out: u64,
}

#[derive(Accounts)]
pub struct Swap<'info> {
    /// CHECK: PDA owning every vault of the program
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump)]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(has_one = quote_mint @ PoolError::InvalidMint)]
    pub config: Box<Account<'info, PoolConfig>>,

    #[account(
        mut,
        has_one = config,
        has_one = base_mint @ PoolError::InvalidMint,
        has_one = base_vault,
        has_one = quote_vault,
    )]
    pub pool: Box<Account<'info, VirtualPool>>,

    /// Trader account holding the input token; its mint picks the direction
    #[account(mut)]
    pub input_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub output_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub base_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub quote_vault: Box<Account<'info, TokenAccount>>,

    pub base_mint: Box<Account<'info, Mint>>,
    pub quote_mint: Box<Account<'info, Mint>>,

    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,

    /// Receives the referral share of the fee when present
    #[account(mut)]
    pub referral_token_account: Option<Box<Account<'info, TokenAccount>>>,
}

impl<'info> Swap<'info> {
    fn trade_direction(&self) -> Result<TradeDirection> {
        let input_mint = self.input_token_account.mint;
        let output_mint = self.output_token_account.mint;
        if input_mint == self.quote_mint.key() && output_mint == self.base_mint.key() {
            Ok(TradeDirection::QuoteToBase)
        } else if input_mint == self.base_mint.key() && output_mint == self.quote_mint.key() {
            Ok(TradeDirection::BaseToQuote)
        } else {
            err!(PoolError::InvalidMint)
        }
    }
}

pub fn handle_swap(ctx: Context<Swap>, params: SwapParameters) -> Result<()> {
    let direction = ctx.accounts.trade_direction()?;
    let config = &ctx.accounts.config;
    let swap_params = SwapParams {
        amount_in: params.amount_in,
        direction,
        has_referral: ctx.accounts.referral_token_account.is_some(),
        current_point: current_point(config.activation_type)?,
    };
    let now = current_timestamp()?;

    let pool = &mut ctx.accounts.pool;
    let result = pool.swap(config, &swap_params, params.minimum_amount_out, now)?;

    let (input_vault, output_vault) = match direction {
        TradeDirection::QuoteToBase => (&ctx.accounts.quote_vault, &ctx.accounts.base_vault),
        TradeDirection::BaseToQuote => (&ctx.accounts.base_vault, &ctx.accounts.quote_vault),
    };
    let vault_authority = ctx.accounts.vault_authority.to_account_info();
    let seeds = vault_authority_seeds!(ctx.bumps.vault_authority);

    transfer_from_user_to_vault(
        &ctx.accounts.input_token_account,
        input_vault,
        &ctx.accounts.payer,
        &ctx.accounts.token_program,
        result.amount_in,
    )?;
    transfer_from_vault(
        output_vault,
        &ctx.accounts.output_token_account,
        &vault_authority,
        &ctx.accounts.token_program,
        &[&seeds[..]],
        result.output_amount,
    )?;

    if let Some(referral_token_account) = &ctx.accounts.referral_token_account {
        let fee_vault = if result.fee_in_quote {
            &ctx.accounts.quote_vault
        } else {
            &ctx.accounts.base_vault
        };
        require_keys_eq!(
            referral_token_account.mint,
            fee_vault.mint,
            PoolError::InvalidMint
        );
        transfer_from_vault(
            fee_vault,
            referral_token_account,
            &vault_authority,
            &ctx.accounts.token_program,
            &[&seeds[..]],
            result.fee.referral,
        )?;
    }

    let pool_key = pool.key();
    emit!(SwapExecuted {
        pool: pool_key,
        trader: ctx.accounts.payer.key(),
        direction,
        amount_in: result.amount_in,
        output_amount: result.output_amount,
        fee_numerator: result.fee_numerator,
        total_fee: result.fee.total,
        protocol_fee: result.fee.protocol,
        partner_fee: result.fee.partner,
        creator_fee: result.fee.creator,
        referral_fee: result.fee.referral,
        fee_in_quote: result.fee_in_quote,
        next_sqrt_price: result.next_sqrt_price,
        quote_reserve: pool.quote_reserve,
        has_referral: swap_params.has_referral,
    });

    if pool.phase(config) == PoolPhase::ThresholdReached {
        msg!("Pool {} reached its migration threshold", pool_key);
        emit!(CurveCompleted {
            pool: pool_key,
            config: pool.config,
            base_reserve: pool.base_reserve,
            quote_reserve: pool.quote_reserve,
            sqrt_price: pool.sqrt_price,
            timestamp: pool.curve_completed_at,
        });
    }
    Ok(())
}
