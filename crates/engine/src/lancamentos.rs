//! Ledger entries (lançamentos).
//!
//! An [`Entry`] is the read-only value the reports work on. It is built from
//! the stored [`Model`] and never written back by the aggregation code.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents, naturezas::is_income_code};

/// Reporting flags carried by every entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFlags {
    /// Included in the income statement (DRE).
    pub dre: bool,
    /// Declared in Eduardo's income tax.
    pub ir_eduardo: bool,
    /// Declared in Roberto's income tax.
    pub ir_roberto: bool,
}

/// Single flag used to narrow listings and reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryFlag {
    Dre,
    IrEduardo,
    IrRoberto,
}

impl EntryFlag {
    pub(crate) fn column(self) -> Column {
        match self {
            Self::Dre => Column::Dre,
            Self::IrEduardo => Column::IrEduardo,
            Self::IrRoberto => Column::IrRoberto,
        }
    }
}

impl TryFrom<&str> for EntryFlag {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "dre" => Ok(Self::Dre),
            "ir_eduardo" => Ok(Self::IrEduardo),
            "ir_roberto" => Ok(Self::IrRoberto),
            other => Err(EngineError::InvalidEntry(format!("unknown flag: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i32,
    pub date: NaiveDate,
    pub natureza_code: String,
    pub conta_id: Option<i32>,
    pub categoria_id: Option<i32>,
    pub centro_id: Option<i32>,
    pub amount: MoneyCents,
    pub flags: EntryFlags,
    pub description: Option<String>,
    pub payment: Option<String>,
    pub counterparty: Option<String>,
    pub attachment_name: Option<String>,
}

impl Entry {
    /// Minimal entry, mostly useful to feed the reports directly.
    pub fn new(id: i32, date: NaiveDate, natureza_code: &str, amount: MoneyCents) -> Self {
        Self {
            id,
            date,
            natureza_code: natureza_code.to_string(),
            conta_id: None,
            categoria_id: None,
            centro_id: None,
            amount,
            flags: EntryFlags::default(),
            description: None,
            payment: None,
            counterparty: None,
            attachment_name: None,
        }
    }

    pub fn with_conta(mut self, conta_id: i32) -> Self {
        self.conta_id = Some(conta_id);
        self
    }

    pub fn with_categoria(mut self, categoria_id: i32) -> Self {
        self.categoria_id = Some(categoria_id);
        self
    }

    pub fn is_income(&self) -> bool {
        is_income_code(&self.natureza_code)
    }
}

/// Input for creating an entry, and the merged state validated on update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub natureza_code: String,
    pub conta_id: Option<i32>,
    pub categoria_id: Option<i32>,
    pub centro_id: Option<i32>,
    pub amount: MoneyCents,
    pub flags: EntryFlags,
    pub description: Option<String>,
    pub payment: Option<String>,
    pub counterparty: Option<String>,
    pub attachment_name: Option<String>,
}

/// Partial update. Outer `None` keeps the stored value; for nullable fields
/// `Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub date: Option<NaiveDate>,
    pub natureza_code: Option<String>,
    pub conta_id: Option<Option<i32>>,
    pub categoria_id: Option<Option<i32>>,
    pub centro_id: Option<Option<i32>>,
    pub amount: Option<MoneyCents>,
    pub flags: Option<EntryFlags>,
    pub description: Option<Option<String>>,
    pub payment: Option<Option<String>>,
    pub counterparty: Option<Option<String>>,
    pub attachment_name: Option<Option<String>>,
}

impl EntryPatch {
    pub(crate) fn apply(self, entry: Entry) -> NewEntry {
        NewEntry {
            date: self.date.unwrap_or(entry.date),
            natureza_code: self.natureza_code.unwrap_or(entry.natureza_code),
            conta_id: self.conta_id.unwrap_or(entry.conta_id),
            categoria_id: self.categoria_id.unwrap_or(entry.categoria_id),
            centro_id: self.centro_id.unwrap_or(entry.centro_id),
            amount: self.amount.unwrap_or(entry.amount),
            flags: self.flags.unwrap_or(entry.flags),
            description: self.description.unwrap_or(entry.description),
            payment: self.payment.unwrap_or(entry.payment),
            counterparty: self.counterparty.unwrap_or(entry.counterparty),
            attachment_name: self.attachment_name.unwrap_or(entry.attachment_name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lancamento")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub data: Date,
    pub natureza_code: String,
    pub conta_id: Option<i32>,
    pub categoria_id: Option<i32>,
    pub centro_id: Option<i32>,
    pub pagamento: Option<String>,
    pub descricao: Option<String>,
    pub fornecedor_cliente: Option<String>,
    pub valor_centavos: i64,
    pub anexo_nome: Option<String>,
    pub dre: bool,
    pub ir_eduardo: bool,
    pub ir_roberto: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::naturezas::Entity",
        from = "Column::NaturezaCode",
        to = "super::naturezas::Column::Code",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Natureza,
    #[sea_orm(
        belongs_to = "super::contas::Entity",
        from = "Column::ContaId",
        to = "super::contas::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Conta,
    #[sea_orm(
        belongs_to = "super::categorias::Entity",
        from = "Column::CategoriaId",
        to = "super::categorias::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Categoria,
    #[sea_orm(
        belongs_to = "super::centros::Entity",
        from = "Column::CentroId",
        to = "super::centros::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Centro,
}

impl Related<super::naturezas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Natureza.def()
    }
}

impl Related<super::contas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Conta.def()
    }
}

impl Related<super::categorias::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categoria.def()
    }
}

impl Related<super::centros::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Centro.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Entry {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            date: model.data,
            natureza_code: model.natureza_code,
            conta_id: model.conta_id,
            categoria_id: model.categoria_id,
            centro_id: model.centro_id,
            amount: MoneyCents::new(model.valor_centavos),
            flags: EntryFlags {
                dre: model.dre,
                ir_eduardo: model.ir_eduardo,
                ir_roberto: model.ir_roberto,
            },
            description: model.descricao,
            payment: model.pagamento,
            counterparty: model.fornecedor_cliente,
            attachment_name: model.anexo_nome,
        }
    }
}

impl From<&NewEntry> for ActiveModel {
    fn from(entry: &NewEntry) -> Self {
        Self {
            id: ActiveValue::NotSet,
            data: ActiveValue::Set(entry.date),
            natureza_code: ActiveValue::Set(entry.natureza_code.clone()),
            conta_id: ActiveValue::Set(entry.conta_id),
            categoria_id: ActiveValue::Set(entry.categoria_id),
            centro_id: ActiveValue::Set(entry.centro_id),
            pagamento: ActiveValue::Set(entry.payment.clone()),
            descricao: ActiveValue::Set(entry.description.clone()),
            fornecedor_cliente: ActiveValue::Set(entry.counterparty.clone()),
            valor_centavos: ActiveValue::Set(entry.amount.cents()),
            anexo_nome: ActiveValue::Set(entry.attachment_name.clone()),
            dre: ActiveValue::Set(entry.flags.dre),
            ir_eduardo: ActiveValue::Set(entry.flags.ir_eduardo),
            ir_roberto: ActiveValue::Set(entry.flags.ir_roberto),
        }
    }
}
