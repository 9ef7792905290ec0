use anchor_lang::prelude::*;

use crate::constants::admin::is_admin;
use crate::error::PoolError;
use crate::events::ClaimFeeOperatorClosed;
use crate::state::ClaimFeeOperator;

#[derive(Accounts)]
pub struct CloseClaimFeeOperator<'info> {
    #[account(mut, close = rent_receiver)]
    pub claim_fee_operator: Account<'info, ClaimFeeOperator>,

    /// CHECK: any account may receive the rent
    #[account(mut)]
    pub rent_receiver: UncheckedAccount<'info>,

    #[account(constraint = is_admin(admin.key) @ PoolError::Unauthorized)]
    pub admin: Signer<'info>,
}

pub fn handle_close_claim_fee_operator(ctx: Context<CloseClaimFeeOperator>) -> Result<()> {
    emit!(ClaimFeeOperatorClosed {
        operator: ctx.accounts.claim_fee_operator.operator,
        closed_at: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
