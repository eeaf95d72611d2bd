use sea_orm::{
    ActiveValue, DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
    prelude::*,
};

use crate::{
    Categoria, Centro, Conta, EngineError, Natureza, ResultEngine, Seed, categorias, centros,
    contas, naturezas, socios,
    util::{name_key, normalize_required_name},
};

use super::{Engine, with_tx};

impl Engine {
    /// Insert the seed taxonomy, cost centers and partners.
    ///
    /// Does nothing when at least one natureza already exists. Returns whether
    /// the seed was applied.
    pub async fn seed(&self, seed: &Seed) -> ResultEngine<bool> {
        if naturezas::Entity::find().count(&self.database).await? > 0 {
            return Ok(false);
        }

        with_tx!(self, |db_tx| {
            Self::insert_seed(&db_tx, seed).await?;
            Ok(true)
        })
    }

    async fn insert_seed(db_tx: &DatabaseTransaction, seed: &Seed) -> ResultEngine<()> {
        for natureza in &seed.naturezas {
            naturezas::ActiveModel {
                code: ActiveValue::Set(natureza.code.clone()),
                nome: ActiveValue::Set(natureza.name.clone()),
            }
            .insert(db_tx)
            .await?;

            for conta in &natureza.contas {
                let conta_model = contas::ActiveModel {
                    id: ActiveValue::NotSet,
                    natureza_code: ActiveValue::Set(natureza.code.clone()),
                    nome: ActiveValue::Set(conta.name.clone()),
                    ativo: ActiveValue::Set(true),
                }
                .insert(db_tx)
                .await?;

                for categoria in &conta.categorias {
                    categorias::ActiveModel {
                        id: ActiveValue::NotSet,
                        conta_id: ActiveValue::Set(conta_model.id),
                        nome: ActiveValue::Set(categoria.clone()),
                        ativo: ActiveValue::Set(true),
                    }
                    .insert(db_tx)
                    .await?;
                }
            }
        }

        for centro in &seed.centros {
            let exists = centros::Entity::find()
                .filter(centros::Column::Nome.eq(centro.as_str()))
                .one(db_tx)
                .await?
                .is_some();
            if !exists {
                centros::ActiveModel {
                    id: ActiveValue::NotSet,
                    nome: ActiveValue::Set(centro.clone()),
                    area_centesimos: ActiveValue::Set(0),
                }
                .insert(db_tx)
                .await?;
            }
        }

        for partner in &seed.partners {
            let exists = socios::Entity::find()
                .filter(socios::Column::Nome.eq(partner.name.as_str()))
                .one(db_tx)
                .await?
                .is_some();
            if !exists {
                socios::ActiveModel {
                    id: ActiveValue::NotSet,
                    nome: ActiveValue::Set(partner.name.clone()),
                    saldo_inicial_centavos: ActiveValue::Set(partner.initial_balance.cents()),
                }
                .insert(db_tx)
                .await?;
            }
        }

        tracing::info!(
            version = seed.version,
            naturezas = seed.naturezas.len(),
            categorias = seed.categoria_count(),
            "seeded taxonomy"
        );
        Ok(())
    }

    /// All naturezas, ordered by code.
    pub async fn list_naturezas(&self) -> ResultEngine<Vec<Natureza>> {
        Ok(naturezas::Entity::find()
            .order_by_asc(naturezas::Column::Code)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Natureza::from)
            .collect())
    }

    pub async fn natureza(&self, code: &str) -> ResultEngine<Natureza> {
        naturezas::Entity::find_by_id(code.to_string())
            .one(&self.database)
            .await?
            .map(Natureza::from)
            .ok_or_else(|| EngineError::KeyNotFound(format!("natureza {code}")))
    }

    /// Contas of a natureza, ordered by name.
    pub async fn list_contas(
        &self,
        natureza_code: &str,
        include_inactive: bool,
    ) -> ResultEngine<Vec<Conta>> {
        self.natureza(natureza_code).await?;

        let mut query = contas::Entity::find().filter(contas::Column::NaturezaCode.eq(natureza_code));
        if !include_inactive {
            query = query.filter(contas::Column::Ativo.eq(true));
        }
        Ok(query
            .order_by_asc(contas::Column::Nome)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Conta::from)
            .collect())
    }

    pub async fn conta(&self, conta_id: i32) -> ResultEngine<Conta> {
        contas::Entity::find_by_id(conta_id)
            .one(&self.database)
            .await?
            .map(Conta::from)
            .ok_or_else(|| EngineError::KeyNotFound(format!("conta {conta_id}")))
    }

    /// Categorias of a conta, ordered by name.
    pub async fn list_categorias(
        &self,
        conta_id: i32,
        include_inactive: bool,
    ) -> ResultEngine<Vec<Categoria>> {
        self.conta(conta_id).await?;

        let mut query = categorias::Entity::find().filter(categorias::Column::ContaId.eq(conta_id));
        if !include_inactive {
            query = query.filter(categorias::Column::Ativo.eq(true));
        }
        Ok(query
            .order_by_asc(categorias::Column::Nome)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Categoria::from)
            .collect())
    }

    pub async fn categoria(&self, categoria_id: i32) -> ResultEngine<Categoria> {
        categorias::Entity::find_by_id(categoria_id)
            .one(&self.database)
            .await?
            .map(Categoria::from)
            .ok_or_else(|| EngineError::KeyNotFound(format!("categoria {categoria_id}")))
    }

    /// First active categoria whose name matches `name`, ignoring case,
    /// accents and punctuation. Lowest id wins when names repeat.
    pub async fn categoria_by_name(&self, name: &str) -> ResultEngine<Option<Categoria>> {
        let wanted = name_key(name);
        if wanted.is_empty() {
            return Ok(None);
        }
        let found = categorias::Entity::find()
            .filter(categorias::Column::Ativo.eq(true))
            .order_by_asc(categorias::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .find(|model| name_key(&model.nome) == wanted);
        Ok(found.map(Categoria::from))
    }

    /// All cost centers, ordered by name.
    pub async fn list_centros(&self) -> ResultEngine<Vec<Centro>> {
        Ok(centros::Entity::find()
            .order_by_asc(centros::Column::Nome)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Centro::from)
            .collect())
    }

    pub async fn centro(&self, centro_id: i32) -> ResultEngine<Centro> {
        centros::Entity::find_by_id(centro_id)
            .one(&self.database)
            .await?
            .map(Centro::from)
            .ok_or_else(|| EngineError::KeyNotFound(format!("centro {centro_id}")))
    }

    /// Create a cost center. Names are unique.
    pub async fn create_centro(&self, name: &str, area_hundredths: i64) -> ResultEngine<Centro> {
        let name = normalize_required_name(name, "centro")?;
        if area_hundredths < 0 {
            return Err(EngineError::InvalidAmount(
                "area must not be negative".to_string(),
            ));
        }

        let existing = centros::Entity::find()
            .filter(centros::Column::Nome.eq(name.as_str()))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey(name));
        }

        let model = centros::ActiveModel {
            id: ActiveValue::NotSet,
            nome: ActiveValue::Set(name),
            area_centesimos: ActiveValue::Set(area_hundredths),
        }
        .insert(&self.database)
        .await?;
        Ok(Centro::from(model))
    }
}
