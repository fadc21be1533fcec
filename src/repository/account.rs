use diesel::prelude::*;

use crate::domain::account::{Account, UserProfile};
use crate::domain::types::AccountId;
use crate::models::account::{Account as DbAccount, UserProfile as DbUserProfile};
use crate::repository::{
    AccountListQuery, AccountReader, AccountWriter, DieselRepository, ProfileListQuery,
    RepositoryResult, like_pattern,
};

impl AccountReader for DieselRepository {
    fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>> {
        use crate::schema::accounts;

        let mut conn = self.conn()?;

        let account = accounts::table
            .filter(accounts::id.eq(id.get()))
            .first::<DbAccount>(&mut conn)
            .optional()?;

        Ok(account.map(TryInto::try_into).transpose()?)
    }

    fn list_accounts(&self, query: AccountListQuery) -> RepositoryResult<(usize, Vec<Account>)> {
        use crate::schema::accounts;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = accounts::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(is_active) = query.is_active {
                items = items.filter(accounts::is_active.eq(is_active));
            }

            if let Some(is_staff) = query.is_staff {
                items = items.filter(accounts::is_staff.eq(is_staff));
            }

            if let Some(is_superadmin) = query.is_superadmin {
                items = items.filter(accounts::is_superadmin.eq(is_superadmin));
            }

            if let Some(search) = &query.search {
                let pattern = like_pattern(search);
                items = items.filter(
                    accounts::email
                        .like(pattern.clone())
                        .escape('\\')
                        .or(accounts::username.like(pattern.clone()).escape('\\'))
                        .or(accounts::first_name.like(pattern.clone()).escape('\\'))
                        .or(accounts::last_name.like(pattern).escape('\\')),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order((accounts::date_joined.desc(), accounts::id.desc()))
            .load::<DbAccount>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Account>, _>>()?;

        Ok((total, items))
    }

    fn list_user_profiles(
        &self,
        query: ProfileListQuery,
    ) -> RepositoryResult<(usize, Vec<UserProfile>)> {
        use crate::schema::{accounts, user_profiles};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = user_profiles::table
                .inner_join(accounts::table)
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(country) = &query.country {
                items = items.filter(user_profiles::country.eq(country.clone()));
            }

            if let Some(state) = &query.state {
                items = items.filter(user_profiles::state.eq(state.clone()));
            }

            if let Some(search) = &query.search {
                let pattern = like_pattern(search);
                items = items.filter(
                    accounts::email
                        .like(pattern.clone())
                        .escape('\\')
                        .or(accounts::first_name.like(pattern.clone()).escape('\\'))
                        .or(user_profiles::city.like(pattern).escape('\\')),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order(user_profiles::id.asc())
            .select((DbUserProfile::as_select(), DbAccount::as_select()))
            .load::<(DbUserProfile, DbAccount)>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<UserProfile>, _>>()?;

        Ok((total, items))
    }
}

impl AccountWriter for DieselRepository {
    fn set_accounts_active(&self, ids: &[AccountId], active: bool) -> RepositoryResult<usize> {
        use crate::schema::accounts;

        let mut conn = self.conn()?;
        let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let affected = diesel::update(accounts::table.filter(accounts::id.eq_any(ids)))
            .set(accounts::is_active.eq(active))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn set_accounts_staff(&self, ids: &[AccountId], staff: bool) -> RepositoryResult<usize> {
        use crate::schema::accounts;

        let mut conn = self.conn()?;
        let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let affected = diesel::update(accounts::table.filter(accounts::id.eq_any(ids)))
            .set(accounts::is_staff.eq(staff))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
