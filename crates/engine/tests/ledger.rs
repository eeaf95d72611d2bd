use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    DateRange, Engine, EngineError, EntryFilter, EntryFlag, EntryFlags, EntryPatch, MoneyCents,
    NewEntry, PartnerAccounts, Seed, TOTAL_KEY,
};
use migration::MigratorTrait;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn partner_accounts() -> PartnerAccounts {
    PartnerAccounts::new()
        .with(1, "APORTE EDUARDO PAIM", "RETIRADAS EDUARDO PAIM")
        .with(2, "APORTE ROBERTO PAIM", "RETIRADAS ROBERTO PAIM")
}

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .partner_accounts(partner_accounts())
        .build()
        .await
        .unwrap();
    assert!(engine.seed(&Seed::embedded().unwrap()).await.unwrap());
    (engine, db)
}

fn new_entry(date: NaiveDate, natureza: &str, cents: i64) -> NewEntry {
    NewEntry {
        date,
        natureza_code: natureza.to_string(),
        conta_id: None,
        categoria_id: None,
        centro_id: None,
        amount: MoneyCents::new(cents),
        flags: EntryFlags::default(),
        description: None,
        payment: None,
        counterparty: None,
        attachment_name: None,
    }
}

/// Entry booked on the categoria named `categoria`, with its conta and natureza.
async fn categorized_entry(engine: &Engine, date: NaiveDate, categoria: &str, cents: i64) -> NewEntry {
    let categoria = engine.categoria_by_name(categoria).await.unwrap().unwrap();
    let conta = engine.conta(categoria.conta_id).await.unwrap();
    NewEntry {
        conta_id: Some(conta.id),
        categoria_id: Some(categoria.id),
        ..new_entry(date, &conta.natureza_code, cents)
    }
}

#[tokio::test]
async fn seed_runs_once() {
    let (engine, _db) = engine_with_db().await;
    assert!(!engine.seed(&Seed::embedded().unwrap()).await.unwrap());

    let codes: Vec<String> = engine
        .list_naturezas()
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.code)
        .collect();
    assert_eq!(codes, vec!["DNO", "DO", "RNO", "RO"]);

    let partners = engine.list_partners().await.unwrap();
    assert_eq!(partners.len(), 2);
    assert_eq!(partners[0].name, "Eduardo Paim");
}

#[tokio::test]
async fn inactive_categorias_are_hidden_by_default() {
    let (engine, db) = engine_with_db().await;
    let categoria = engine.categoria_by_name("OUTROS").await.unwrap().unwrap();
    let before = engine
        .list_categorias(categoria.conta_id, false)
        .await
        .unwrap()
        .len();

    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "UPDATE categoria SET ativo = 0 WHERE id = ?",
        vec![categoria.id.into()],
    ))
    .await
    .unwrap();

    let active = engine.list_categorias(categoria.conta_id, false).await.unwrap();
    let all = engine.list_categorias(categoria.conta_id, true).await.unwrap();
    assert_eq!(active.len(), before - 1);
    assert_eq!(all.len(), before);
}

#[tokio::test]
async fn categoria_lookup_ignores_case_and_accents() {
    let (engine, _db) = engine_with_db().await;
    let exact = engine
        .categoria_by_name("JUROS E CORREÇÕES")
        .await
        .unwrap()
        .unwrap();
    let loose = engine
        .categoria_by_name("juros e correcoes")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(exact.id, loose.id);
    assert!(engine.categoria_by_name("nao existe").await.unwrap().is_none());
}

#[tokio::test]
async fn create_update_delete_entry() {
    let (engine, _db) = engine_with_db().await;
    let mut new = categorized_entry(&engine, date(2024, 3, 10), "JUROS E CORREÇÕES", 12_345).await;
    new.description = Some("  juros poupança ".to_string());

    let entry = engine.create_entry(new).await.unwrap();
    assert_eq!(entry.description.as_deref(), Some("juros poupança"));
    assert!(entry.is_income());

    let updated = engine
        .update_entry(
            entry.id,
            EntryPatch {
                amount: Some(MoneyCents::new(20_000)),
                description: Some(None),
                flags: Some(EntryFlags {
                    dre: true,
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount, MoneyCents::new(20_000));
    assert_eq!(updated.description, None);
    assert_eq!(updated.categoria_id, entry.categoria_id);
    assert!(updated.flags.dre);

    engine.delete_entry(entry.id).await.unwrap();
    assert!(matches!(
        engine.delete_entry(entry.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn entry_references_are_checked() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_entry(new_entry(date(2024, 1, 1), "XX", 100))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    // Categoria under RNO booked against DO.
    let mut wrong = categorized_entry(&engine, date(2024, 1, 1), "APORTE EDUARDO PAIM", 100).await;
    wrong.natureza_code = "DO".to_string();
    assert!(matches!(
        engine.create_entry(wrong).await,
        Err(EngineError::InvalidEntry(_))
    ));

    let mut orphan = categorized_entry(&engine, date(2024, 1, 1), "APORTE EDUARDO PAIM", 100).await;
    orphan.conta_id = None;
    assert!(matches!(
        engine.create_entry(orphan).await,
        Err(EngineError::InvalidEntry(_))
    ));

    let mut no_centro = new_entry(date(2024, 1, 1), "DO", 100);
    no_centro.centro_id = Some(999);
    assert!(matches!(
        engine.create_entry(no_centro).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn fetch_entries_applies_filters() {
    let (engine, _db) = engine_with_db().await;
    let milho = engine.create_centro("Milho", 12_050).await.unwrap();

    let mut a = new_entry(date(2024, 1, 15), "DO", 1_000);
    a.centro_id = Some(milho.id);
    a.flags.ir_roberto = true;
    engine.create_entry(a).await.unwrap();
    engine
        .create_entry(new_entry(date(2024, 2, 1), "RO", 5_000))
        .await
        .unwrap();
    engine
        .create_entry(new_entry(date(2023, 12, 31), "DO", 700))
        .await
        .unwrap();

    let all = engine.fetch_entries(&EntryFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].date, date(2024, 2, 1));

    let year = engine
        .fetch_entries(&EntryFilter {
            from: Some(date(2024, 1, 1)),
            to: Some(date(2024, 12, 31)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(year.len(), 2);

    let by_centro = engine
        .fetch_entries(&EntryFilter {
            centro_id: Some(milho.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_centro.len(), 1);

    let flagged = engine
        .fetch_entries(&EntryFilter {
            flag: Some(EntryFlag::IrRoberto),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].amount, MoneyCents::new(1_000));

    let inverted = engine
        .fetch_entries(&EntryFilter {
            from: Some(date(2024, 2, 1)),
            to: Some(date(2024, 1, 1)),
            ..Default::default()
        })
        .await;
    assert!(matches!(inverted, Err(EngineError::InvalidRange(_))));
}

#[tokio::test]
async fn create_centro_rejects_duplicates() {
    let (engine, _db) = engine_with_db().await;
    assert!(matches!(
        engine.create_centro("Soja", 0).await,
        Err(EngineError::ExistingKey(_))
    ));
    assert!(matches!(
        engine.create_centro("  ", 0).await,
        Err(EngineError::InvalidName(_))
    ));
    assert!(matches!(
        engine.create_centro("Arroz", -1).await,
        Err(EngineError::InvalidAmount(_))
    ));
}

#[tokio::test]
async fn summary_carries_labels() {
    let (engine, _db) = engine_with_db().await;
    engine
        .create_entry(categorized_entry(&engine, date(2024, 1, 5), "JUROS E CORREÇÕES", 10_000).await)
        .await
        .unwrap();
    engine
        .create_entry(new_entry(date(2024, 1, 6), "DO", 4_000))
        .await
        .unwrap();

    let summary = engine.summary(&EntryFilter::default()).await.unwrap();
    assert_eq!(summary.totals.key, TOTAL_KEY);
    assert_eq!(summary.totals.income, MoneyCents::new(10_000));
    assert_eq!(summary.totals.expense, MoneyCents::new(4_000));
    assert_eq!(summary.totals.result, MoneyCents::new(6_000));

    let rno = summary
        .by_natureza
        .iter()
        .find(|item| item.key == "RNO")
        .unwrap();
    assert_eq!(rno.label.as_deref(), Some("RECEITAS NÃO OPERACIONAIS"));
    assert_eq!(summary.by_categoria.len(), 1);
    assert_eq!(
        summary.by_categoria[0].label.as_deref(),
        Some("JUROS E CORREÇÕES")
    );
}

#[tokio::test]
async fn partner_statement_for_a_contribution() {
    let (engine, _db) = engine_with_db().await;
    engine
        .create_entry(categorized_entry(&engine, date(2024, 1, 20), "APORTE EDUARDO PAIM", 50_000).await)
        .await
        .unwrap();
    engine
        .create_entry(categorized_entry(&engine, date(2024, 3, 2), "RETIRADAS EDUARDO PAIM", 20_000).await)
        .await
        .unwrap();
    // Roberto's contribution never shows in Eduardo's statement.
    engine
        .create_entry(categorized_entry(&engine, date(2024, 1, 21), "APORTE ROBERTO PAIM", 99_900).await)
        .await
        .unwrap();

    engine
        .set_initial_balance(1, MoneyCents::new(1_000))
        .await
        .unwrap();
    let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
    let statement = engine.partner_statement(1, range).await.unwrap();

    assert_eq!(statement.partner_name, "Eduardo Paim");
    assert_eq!(statement.initial_balance, MoneyCents::new(1_000));
    assert_eq!(statement.statement.len(), 2);
    assert_eq!(statement.statement[0].month.to_string(), "2024-01");
    assert_eq!(statement.statement[0].inflow, MoneyCents::new(50_000));
    assert_eq!(statement.statement[0].outflow, MoneyCents::ZERO);
    assert_eq!(statement.statement[0].balance_after, MoneyCents::new(51_000));
    assert_eq!(statement.statement[1].month.to_string(), "2024-03");
    assert_eq!(statement.statement[1].balance_after, MoneyCents::new(31_000));
}

#[tokio::test]
async fn unmapped_partner_is_rejected() {
    let (engine, db) = engine_with_db().await;
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO socio (nome, saldo_inicial_centavos) VALUES (?, ?)",
        vec!["Maria Silva".into(), 0i64.into()],
    ))
    .await
    .unwrap();
    let maria = engine
        .list_partners()
        .await
        .unwrap()
        .into_iter()
        .find(|p| p.name == "Maria Silva")
        .unwrap();

    let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
    assert_eq!(
        engine.partner_statement(maria.id, range).await.unwrap_err(),
        EngineError::UnmappedPartner("Maria Silva".to_string())
    );
    assert!(matches!(
        engine.partner_statement(404, range).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn entry_amounts_are_bounded() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_entry(new_entry(date(2024, 1, 1), "RO", i64::MAX))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let largest = engine
        .create_entry(new_entry(
            date(2024, 1, 1),
            "RO",
            MoneyCents::MAX_ENTRY.cents(),
        ))
        .await
        .unwrap();
    let err = engine
        .update_entry(
            largest.id,
            EntryPatch {
                amount: Some(MoneyCents::new(i64::MIN)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    // Many entries at the bound still sum without overflow.
    for _ in 0..3 {
        engine
            .create_entry(new_entry(
                date(2024, 1, 2),
                "RO",
                MoneyCents::MAX_ENTRY.cents(),
            ))
            .await
            .unwrap();
    }
    let summary = engine.summary(&EntryFilter::default()).await.unwrap();
    assert_eq!(
        summary.totals.income.cents(),
        4 * MoneyCents::MAX_ENTRY.cents()
    );
}
