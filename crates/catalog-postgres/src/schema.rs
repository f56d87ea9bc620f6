// Keep in sync with ../migrations.

diesel::table! {
    use diesel::sql_types::*;

    brands (id) {
        id -> Int8,
        name -> Text,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    product_variations (id) {
        id -> Int8,
        quantity -> Int4,
        product_id -> Int8,
        variation_id -> Int8,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    products (id) {
        id -> Int8,
        created_at -> Timestamptz,
        name -> Text,
        price -> Int4,
        brand_id -> Nullable<Int8>,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    variations (id) {
        id -> Int8,
        name -> Text,
    }
}

diesel::joinable!(product_variations -> products (product_id));
diesel::joinable!(product_variations -> variations (variation_id));
diesel::joinable!(products -> brands (brand_id));

diesel::allow_tables_to_appear_in_same_query!(brands, product_variations, products, variations,);
