use handlebars::Handlebars;
use std::sync::Arc;

pub type Hbs = Arc<Handlebars<'static>>;

pub fn build_handlebars() -> Hbs {
    let mut hb = Handlebars::new();

    // Layout + pages
    hb.register_template_file("layouts/base", "templates/layouts/base.hbs")
        .expect("template layouts/base");

    hb.register_template_file("pages/home", "templates/pages/home.hbs")
        .expect("template pages/home");
    hb.register_template_file("pages/not_found", "templates/pages/not_found.hbs")
        .expect("template pages/not_found");
    hb.register_template_file("pages/account", "templates/pages/account.hbs")
        .expect("template pages/account");
    hb.register_template_file("pages/recharge", "templates/pages/recharge.hbs")
        .expect("template pages/recharge");
    hb.register_template_file("pages/support", "templates/pages/support.hbs")
        .expect("template pages/support");
    hb.register_template_file("pages/wallet", "templates/pages/wallet.hbs")
        .expect("template pages/wallet");
    hb.register_template_file("pages/crypto_exchange", "templates/pages/crypto_exchange.hbs")
        .expect("template pages/crypto_exchange");
    hb.register_template_file("pages/suspended", "templates/pages/suspended.hbs")
        .expect("template pages/suspended");
    hb.register_template_file("pages/admin_withdrawal", "templates/pages/admin_withdrawal.hbs")
        .expect("template pages/admin_withdrawal");

    // Popups
    hb.register_template_file("partials/attention_popup", "templates/partials/attention_popup.hbs")
        .expect("template partials/attention_popup");
    hb.register_template_file("partials/recharge_popup", "templates/partials/recharge_popup.hbs")
        .expect("template partials/recharge_popup");
    hb.register_template_file("partials/reviewed_popup", "templates/partials/reviewed_popup.hbs")
        .expect("template partials/reviewed_popup");
    hb.register_template_file("partials/insufficient_popup", "templates/partials/insufficient_popup.hbs")
        .expect("template partials/insufficient_popup");
    hb.register_template_file("partials/spin_modal", "templates/partials/spin_modal.hbs")
        .expect("template partials/spin_modal");

    // Partial endpoints
    hb.register_template_file("partials/withdraw_modal", "templates/partials/withdraw_modal.hbs")
        .expect("template partials/withdraw_modal");
    hb.register_template_file("partials/withdrawals_list", "templates/partials/withdrawals_list.hbs")
        .expect("template partials/withdrawals_list");

    let navbar = std::fs::read_to_string("templates/partials/navbar.hbs")
        .expect("partials/navbar.hbs");
    hb.register_partial("navbar", navbar).expect("register navbar partial");

    let notice = std::fs::read_to_string("templates/partials/notice.hbs")
        .expect("partials/notice.hbs");
    hb.register_partial("notice", notice).expect("register notice partial");

    Arc::new(hb)
}
