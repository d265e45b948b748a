//! Ranked song list with the top five highlighted.

use leptos::prelude::*;

use crate::net::types::Song;
use crate::util::format::{TOP_SONGS, format_view_count, rank_label, split_ranking};

#[component]
pub fn SongList(#[prop(into)] songs: Signal<Vec<Song>>) -> impl IntoView {
    move || {
        let all = songs.get();
        if all.is_empty() {
            return view! {
                <p class="song-list__empty">"Nenhuma música encontrada"</p>
            }
            .into_any();
        }

        let (top, rest) = split_ranking(&all, TOP_SONGS);
        let top_rows = top
            .iter()
            .enumerate()
            .map(|(i, song)| view! { <SongRow song=song.clone() rank=i highlighted=true/> })
            .collect::<Vec<_>>();
        let rest_rows = rest
            .iter()
            .enumerate()
            .map(|(i, song)| view! { <SongRow song=song.clone() rank=top.len() + i/> })
            .collect::<Vec<_>>();
        let has_rest = !rest_rows.is_empty();

        view! {
            <section class="song-list">
                <ol class="song-list__top">{top_rows}</ol>
                {has_rest.then(|| view! {
                    <h3 class="song-list__heading song-list__heading--rest">"Outras Músicas"</h3>
                    <ol class="song-list__rest">{rest_rows}</ol>
                })}
            </section>
        }
        .into_any()
    }
}

#[component]
fn SongRow(song: Song, rank: usize, #[prop(optional)] highlighted: bool) -> impl IntoView {
    let class = if highlighted { "song-row song-row--top" } else { "song-row" };
    let views = format_view_count(song.view_count);
    view! {
        <li class=class>
            <span class="song-row__rank">{rank_label(rank)}</span>
            <img class="song-row__thumb" src=song.image alt=song.title.clone()/>
            <div class="song-row__info">
                <span class="song-row__title" title=song.title.clone()>{song.title.clone()}</span>
                <span class="song-row__views">{views}</span>
            </div>
            <a class="song-row__play" href=song.link target="_blank" rel="noopener noreferrer">
                "Ouvir"
            </a>
        </li>
    }
}
