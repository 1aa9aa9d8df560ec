use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use rentdesk_core::auth::{Outlet, Role, UserProfile};
use rentdesk_core::customer::{
    generate_customer_code, materialize_customer, CreateCustomerRequest, InventoryItem, Invoice,
    NewCustomer, RentalOrder, RentalOrderItem,
};

use super::backend::InMemoryBackend;

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "rentdesk-demo";

/// Demo accounts as `(email, role)`.
pub const DEMO_ACCOUNTS: [(&str, Role); 3] = [
    ("admin@rentdesk.test", Role::Admin),
    ("accounts@rentdesk.test", Role::Accountant),
    ("harbor.manager@rentdesk.test", Role::Manager),
];

impl InMemoryBackend {
    /// Creates a backend seeded with demo accounts, outlets and customers.
    ///
    /// The manager account is assigned to a single active outlet so it gets
    /// that outlet pre-selected on login.
    pub async fn with_demo_data() -> Self {
        let backend = Self::new();
        let now = Utc::now();

        let outlets = [
            Outlet::new("Airport"),
            Outlet::new("Harbor"),
            Outlet::new("Old Town").inactive(),
        ];
        for outlet in &outlets {
            backend.insert_outlet(outlet.clone()).await;
        }

        for (email, role) in DEMO_ACCOUNTS {
            let user = backend.register_user(email, DEMO_PASSWORD).await;
            backend
                .insert_profile(UserProfile::new(user.id, role).with_email(email))
                .await;
            if role == Role::Manager {
                backend.assign_outlet(user.id, outlets[1].id).await;
                backend.assign_outlet(user.id, outlets[2].id).await;
            }
        }

        let requests = [
            CreateCustomerRequest::new("business", "Rosa Diaz")
                .with_company_name("Harbor Events Ltd")
                .with_email("rosa@harborevents.test"),
            CreateCustomerRequest::new("individual", "Luis Pereira").with_phone("+598 99 123 456"),
            CreateCustomerRequest::new("business", "Marta Silva")
                .with_company_name("Silva Catering")
                .with_phone("+598 2 900 1234"),
        ];

        let mut customer_ids = Vec::new();
        {
            let mut customers = backend.customers.write().await;
            for (offset, request) in requests.into_iter().enumerate() {
                let created_at = now - Duration::days(offset as i64 + 1);
                let new_customer = NewCustomer {
                    customer_code: generate_customer_code(created_at),
                    details: request,
                    created_by: None,
                };
                let customer = materialize_customer(new_customer, Uuid::new_v4(), created_at);
                customer_ids.push(customer.id);
                customers.insert(customer.id, customer);
            }
        }
        let customer_id = customer_ids[0];

        let tent = InventoryItem {
            id: Uuid::new_v4(),
            name: "Party tent 6x12".to_string(),
            sku: Some("TENT-612".to_string()),
        };
        backend
            .insert_order(RentalOrder {
                id: Uuid::new_v4(),
                order_number: "RO-0001".to_string(),
                customer_id,
                outlet_id: Some(outlets[1].id),
                status: "completed".to_string(),
                start_date: NaiveDate::from_ymd_opt(2024, 3, 8),
                end_date: NaiveDate::from_ymd_opt(2024, 3, 10),
                total_amount: Decimal::new(36000, 2),
                created_at: now - Duration::days(30),
                items: vec![RentalOrderItem {
                    id: Uuid::new_v4(),
                    inventory_item_id: tent.id,
                    quantity: 2,
                    daily_rate: Some(Decimal::new(6000, 2)),
                    inventory_item: Some(tent),
                }],
            })
            .await;

        if let Some(invoice_date) = NaiveDate::from_ymd_opt(2024, 3, 10) {
            backend
                .insert_invoice(Invoice {
                    id: Uuid::new_v4(),
                    invoice_number: "INV-0001".to_string(),
                    customer_id,
                    order_id: None,
                    invoice_date,
                    due_date: invoice_date.checked_add_signed(Duration::days(30)),
                    total_amount: Decimal::new(36000, 2),
                    paid_amount: Decimal::new(10000, 2),
                    status: "partially_paid".to_string(),
                })
                .await;
        }

        backend
    }
}
