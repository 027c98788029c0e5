use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::whatsapp::WhatsAppButton;
use crate::config;
use crate::Route;

const SERVICES: &[(&str, &str, &str)] = &[
    (
        "⚡",
        "Instalações Elétricas",
        "Projetos completos para residências, comércios e indústrias com segurança e eficiência.",
    ),
    (
        "🔧",
        "Manutenção Preventiva",
        "Evite problemas futuros com revisões periódicas e diagnósticos precisos.",
    ),
    (
        "📞",
        "Atendimento Emergencial",
        "Disponível 24h para resolver problemas elétricos com rapidez e eficiência.",
    ),
    (
        "🛠",
        "Automação Residencial",
        "Controle sua casa com tecnologias modernas e práticas para mais conforto.",
    ),
];

const TESTIMONIALS: &[(&str, &str)] = &[
    ("Maria S.", "Serviço excelente! Resolveram meu problema elétrico rapidamente e com muita eficiência."),
    ("João P.", "Equipe muito profissional e atenciosa. Recomendo a todos!"),
    ("Carla M.", "Ótima experiência! Contratarei novamente no futuro."),
];

#[function_component(Landing)]
pub fn landing() -> Html {
    // Scroll to top only on initial mount
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    html! {
        <div class="landing-page">
            <style>
                {r#"
                    .landing-page section { padding: 4rem 2rem; text-align: center; }
                    .hero {
                        min-height: 80vh;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        color: #fff;
                        background: linear-gradient(rgba(15, 23, 42, 0.6), rgba(15, 23, 42, 0.6)), url('/eletricista.jpg') center / cover;
                    }
                    .hero h1 { font-size: 2.75rem; margin-bottom: 1rem; }
                    .hero p { font-size: 1.2rem; max-width: 640px; margin-bottom: 2rem; }
                    .cta-button {
                        background: #facc15;
                        color: #1e3a8a;
                        font-weight: bold;
                        padding: 0.9rem 2rem;
                        border-radius: 999px;
                        text-decoration: none;
                    }
                    .services { background: #f9fafb; }
                    .card-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
                        gap: 1.5rem;
                        max-width: 1100px;
                        margin: 2rem auto 0;
                    }
                    .card {
                        background: #fff;
                        border-radius: 12px;
                        padding: 1.5rem;
                        box-shadow: 0 4px 16px rgba(0, 0, 0, 0.08);
                    }
                    .card .icon { font-size: 2rem; }
                    .about-content { max-width: 760px; margin: 0 auto; line-height: 1.7; }
                    .contact-list { list-style: none; padding: 0; line-height: 2; }
                    .landing-footer { padding: 2rem; text-align: center; background: #1e3a8a; color: #fff; }
                    .landing-footer a { color: #facc15; }
                "#}
            </style>

            <section id="hero" class="hero">
                <h1>{"Soluções Elétricas de Alta Qualidade"}</h1>
                <p>{"Garantimos segurança, eficiência e atendimento personalizado para todos os nossos serviços."}</p>
                <Link<Route> to={Route::Quote} classes="cta-button">
                    {"Solicitar Orçamento"}
                </Link<Route>>
            </section>

            <section id="services" class="services">
                <h2>{"Nossos Serviços"}</h2>
                <div class="card-grid">
                    { for SERVICES.iter().map(|(icon, title, text)| html! {
                        <div class="card">
                            <div class="icon">{*icon}</div>
                            <h3>{*title}</h3>
                            <p>{*text}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section id="about">
                <h2>{"Sobre Nós"}</h2>
                <div class="about-content">
                    <p>{"Somos uma família dedicada a oferecer serviços elétricos de alta qualidade na região de Volta Redonda há mais de 15 anos. Nosso compromisso é com a segurança, eficiência e satisfação dos nossos clientes."}</p>
                    <p>{"Seja para instalações elétricas, manutenção ou automação residencial, estamos prontos para atender você!"}</p>
                </div>
            </section>

            <section id="testimonials" class="services">
                <h2>{"O que dizem nossos clientes"}</h2>
                <div class="card-grid">
                    { for TESTIMONIALS.iter().map(|(author, quote)| html! {
                        <div class="card">
                            <p>{format!("\"{}\"", quote)}</p>
                            <strong>{*author}</strong>
                        </div>
                    }) }
                </div>
            </section>

            <section id="contact">
                <h2>{"Entre em Contato"}</h2>
                <p>{"Precisa de ajuda com serviços elétricos? Entre em contato conosco e nossa equipe estará pronta para atender você!"}</p>
                <ul class="contact-list">
                    <li>{format!("📞 +{}", config::WHATSAPP_NUMBER)}</li>
                    <li>{"📍 Volta Redonda - RJ"}</li>
                </ul>
                <Link<Route> to={Route::Quote} classes="cta-button">
                    {"Solicitar Orçamento"}
                </Link<Route>>
            </section>

            <footer class="landing-footer">
                <p>{format!("© {}. Todos os direitos reservados.", config::BUSINESS_NAME)}</p>
            </footer>

            <WhatsAppButton />
        </div>
    }
}
