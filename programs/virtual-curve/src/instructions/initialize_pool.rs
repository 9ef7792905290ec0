use anchor_lang::prelude::*;
use anchor_spl::metadata::{
    create_metadata_accounts_v3, mpl_token_metadata::types::DataV2, CreateMetadataAccountsV3,
    Metadata,
};
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::PoolError;
use crate::events::PoolInitialized;
use crate::state::{PoolConfig, VirtualPool};
use crate::utils::{creator_binding_seed, current_point, mint_with_vault_authority, revoke_mint_authority};
use crate::vault_authority_seeds;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct InitializePoolParameters {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

impl InitializePoolParameters {
    pub fn validate(&self) -> Result<()> {
        require!(
            !self.name.is_empty() && self.name.len() <= MAX_NAME_LENGTH,
            PoolError::InvalidTokenMetadata
        );
        require!(
            !self.symbol.is_empty() && self.symbol.len() <= MAX_SYMBOL_LENGTH,
            PoolError::InvalidTokenMetadata
        );
        require!(self.uri.len() <= MAX_URI_LENGTH, PoolError::InvalidTokenMetadata);
        Ok(())
    }
}

#[derive(Accounts)]
#[instruction(params: InitializePoolParameters)]
pub struct InitializePool<'info> {
    #[account(has_one = quote_mint @ PoolError::InvalidMint)]
    pub config: Box<Account<'info, PoolConfig>>,

    /// CHECK: PDA owning every vault and mint of the program
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump)]
    pub vault_authority: UncheckedAccount<'info>,

    /// Must sign so nobody else can claim creator rights on this address
    pub creator: Signer<'info>,

    #[account(
        init,
        payer = payer,
        seeds = [
            BASE_MINT_SEED,
            config.key().as_ref(),
            creator_binding_seed(creator.key),
            params.symbol.as_bytes(),
        ],
        bump,
        mint::decimals = config.token_decimal,
        mint::authority = vault_authority,
    )]
    pub base_mint: Box<Account<'info, Mint>>,

    pub quote_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = payer,
        seeds = [
            POOL_SEED,
            config.key().as_ref(),
            base_mint.key().as_ref(),
            quote_mint.key().as_ref(),
        ],
        bump,
        space = 8 + VirtualPool::INIT_SPACE
    )]
    pub pool: Box<Account<'info, VirtualPool>>,

    #[account(
        init,
        payer = payer,
        seeds = [TOKEN_VAULT_SEED, base_mint.key().as_ref(), pool.key().as_ref()],
        bump,
        token::mint = base_mint,
        token::authority = vault_authority,
    )]
    pub base_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = payer,
        seeds = [TOKEN_VAULT_SEED, quote_mint.key().as_ref(), pool.key().as_ref()],
        bump,
        token::mint = quote_mint,
        token::authority = vault_authority,
    )]
    pub quote_vault: Box<Account<'info, TokenAccount>>,

    /// CHECK: created and validated by the metadata program
    #[account(mut)]
    pub mint_metadata: UncheckedAccount<'info>,

    pub metadata_program: Program<'info, Metadata>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handle_initialize_pool(
    ctx: Context<InitializePool>,
    params: InitializePoolParameters,
) -> Result<()> {
    params.validate()?;

    let config = &ctx.accounts.config;
    let vault_authority = ctx.accounts.vault_authority.to_account_info();
    let seeds = vault_authority_seeds!(ctx.bumps.vault_authority);

    create_metadata_accounts_v3(
        CpiContext::new_with_signer(
            ctx.accounts.metadata_program.to_account_info(),
            CreateMetadataAccountsV3 {
                metadata: ctx.accounts.mint_metadata.to_account_info(),
                mint: ctx.accounts.base_mint.to_account_info(),
                mint_authority: vault_authority.clone(),
                payer: ctx.accounts.payer.to_account_info(),
                update_authority: vault_authority.clone(),
                system_program: ctx.accounts.system_program.to_account_info(),
                rent: ctx.accounts.rent.to_account_info(),
            },
            &[&seeds[..]],
        ),
        DataV2 {
            name: params.name,
            symbol: params.symbol,
            uri: params.uri,
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
        },
        false,
        true,
        None,
    )?;

    // Whole supply goes to the vault; no one can mint after this
    mint_with_vault_authority(
        &ctx.accounts.base_mint,
        &ctx.accounts.base_vault,
        &vault_authority,
        &ctx.accounts.token_program,
        &[&seeds[..]],
        config.initial_base_supply,
    )?;
    revoke_mint_authority(
        &ctx.accounts.base_mint,
        &vault_authority,
        &ctx.accounts.token_program,
        &[&seeds[..]],
    )?;

    let activation_point = current_point(config.activation_type)?;
    let pool_key = ctx.accounts.pool.key();
    let config_key = config.key();
    let creator = ctx.accounts.creator.key();
    let base_mint = ctx.accounts.base_mint.key();
    let base_vault = ctx.accounts.base_vault.key();
    let quote_vault = ctx.accounts.quote_vault.key();

    let pool = &mut ctx.accounts.pool;
    pool.initialize(
        config_key,
        config,
        creator,
        base_mint,
        base_vault,
        quote_vault,
        activation_point,
    );

    msg!("Pool {} created by {}", pool_key, creator);
    emit!(PoolInitialized {
        pool: pool_key,
        config: config_key,
        creator,
        base_mint,
        base_supply: config.initial_base_supply,
        sqrt_price: pool.sqrt_price,
        activation_point,
    });
    Ok(())
}
