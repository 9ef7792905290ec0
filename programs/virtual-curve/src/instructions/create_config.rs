use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::events::ConfigCreated;
use crate::state::{ConfigParameters, PoolConfig};

#[derive(Accounts)]
pub struct CreateConfig<'info> {
    #[account(init, payer = payer, space = 8 + PoolConfig::INIT_SPACE)]
    pub config: Box<Account<'info, PoolConfig>>,

    /// CHECK: partner identity allowed to claim partner fees and surplus
    pub fee_claimer: UncheckedAccount<'info>,

    /// CHECK: owner of the token account receiving leftover base
    pub leftover_receiver: UncheckedAccount<'info>,

    /// Only SPL token quote mints pass the account owner check
    pub quote_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_create_config(ctx: Context<CreateConfig>, params: ConfigParameters) -> Result<()> {
    let config = params.build(
        ctx.accounts.quote_mint.key(),
        ctx.accounts.fee_claimer.key(),
        ctx.accounts.leftover_receiver.key(),
    )?;

    msg!(
        "Config created: threshold {} quote, {} base minted per pool",
        config.migration_quote_threshold,
        config.initial_base_supply
    );
    emit!(ConfigCreated {
        config: ctx.accounts.config.key(),
        quote_mint: config.quote_mint,
        fee_claimer: config.fee_claimer,
        leftover_receiver: config.leftover_receiver,
        migration_sqrt_price: config.migration_sqrt_price,
        initial_base_supply: config.initial_base_supply,
        params,
    });

    ctx.accounts.config.set_inner(config);
    Ok(())
}
